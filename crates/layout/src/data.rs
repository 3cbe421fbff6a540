use serde::{Deserialize, Serialize};

/// Raw chart input: declared sectors and rings plus the blips that reference
/// them. Sector and ring ordinals are their positions in the lists; rings are
/// listed innermost first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadarData {
    pub sectors: Vec<String>,
    pub rings: Vec<String>,
    pub blips: Vec<Blip>,
}

/// One data point, assigned to exactly one sector and one ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blip {
    pub id: String,
    pub sector: String,
    pub ring: String,
    /// Another blip's id, consulted only by inherited-color resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Blip {
    pub fn new(
        id: impl Into<String>,
        sector: impl Into<String>,
        ring: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sector: sector.into(),
            ring: ring.into(),
            parent: None,
        }
    }
}
