use std::collections::HashMap;

/// The default blip palette.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#e8c1a0", "#f47560", "#f1e15b", "#e8a838", "#61cdbb", "#97e3d5",
];

/// Which property of a blip keys the ordinal color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorBy {
    #[default]
    Depth,
    Id,
    Sector,
}

/// Ordinal color scale: keys are assigned palette entries in first-seen
/// order, cycling when the palette runs out.
#[derive(Debug, Clone)]
pub struct OrdinalColors {
    palette: Vec<String>,
    assigned: HashMap<String, usize>,
}

impl Default for OrdinalColors {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.iter().map(ToString::to_string).collect())
    }
}

impl OrdinalColors {
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette,
            assigned: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, key: &str) -> String {
        if self.palette.is_empty() {
            return String::new();
        }
        let next = self.assigned.len() % self.palette.len();
        let index = *self.assigned.entry(key.to_string()).or_insert(next);
        self.palette[index % self.palette.len()].clone()
    }
}

/// Inherited-color rule applied to a resolved parent node: darken the
/// parent's color, d3-style (`channel * 0.7^k`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InheritedColor {
    pub darker: f64,
}

impl Default for InheritedColor {
    fn default() -> Self {
        Self { darker: 0.3 }
    }
}

impl InheritedColor {
    /// Malformed input colors pass through unchanged.
    pub fn resolve(&self, parent_color: &str) -> String {
        darken(parent_color, self.darker).unwrap_or_else(|| parent_color.to_string())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn darken(hex: &str, amount: f64) -> Option<String> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(digits.get(range)?, 16).ok()
    };
    let (r, g, b) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);

    let factor = 0.7_f64.powf(amount);
    let scale = |value: u8| (f64::from(value) * factor).round().clamp(0.0, 255.0) as u8;

    Some(format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b)))
}
