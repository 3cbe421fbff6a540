use std::f64::consts::{FRAC_PI_2, TAU};

use rand::Rng;

/// Min/max clamp that degrades to the lower bound when the band is inverted
/// (`f64::clamp` would panic there, and inverted bands are the expected shape
/// of a degenerate cell).
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

pub(crate) fn polar_to_cartesian(
    center_x: f64,
    center_y: f64,
    radius: f64,
    angle: f64,
) -> (f64, f64) {
    (
        angle.cos().mul_add(radius, center_x),
        angle.sin().mul_add(radius, center_y),
    )
}

fn uniform(rng: &mut impl Rng, start: f64, end: f64) -> f64 {
    rng.gen::<f64>().mul_add(end - start, start)
}

/// Draws individually valid blip positions inside an annular-sector cell:
/// the radial band is inset by the blip radius, the angular span by the
/// margin a circle of that radius subtends at the sampled distance.
pub(crate) struct CellSampler<'a> {
    radii: &'a [f64],
    angles: &'a [f64],
    blip_radius: f64,
}

impl<'a> CellSampler<'a> {
    pub(crate) fn new(radii: &'a [f64], angles: &'a [f64], blip_radius: f64) -> Self {
        Self {
            radii,
            angles,
            blip_radius,
        }
    }

    pub(crate) const fn blip_radius(&self) -> f64 {
        self.blip_radius
    }

    /// Angular inset keeping a circle of `blip_radius` inside a wedge edge at
    /// the given distance from the center. Saturates at a quarter turn for
    /// distances the circle does not fit at, so the asin operand never leaves
    /// its domain.
    fn angular_margin(&self, radius: f64) -> f64 {
        if radius <= self.blip_radius {
            return FRAC_PI_2;
        }
        (self.blip_radius / radius).asin()
    }

    /// Angular span of a sector; the last sector wraps to `angles[0] + 2π`.
    fn sector_span(&self, sector: usize) -> f64 {
        let start = self.angles[sector];
        let end = if sector == self.angles.len() - 1 {
            self.angles[0] + TAU
        } else {
            self.angles[sector + 1]
        };
        end - start
    }

    /// Draw a polar `(radius, angle)` position for a blip in the given ring,
    /// and sector when one is declared. Never fails: a cell with no valid
    /// region collapses onto its nearest boundary instead.
    pub(crate) fn sample(
        &self,
        ring: usize,
        sector: Option<usize>,
        rng: &mut impl Rng,
    ) -> (f64, f64) {
        let band_start = self.radii[ring] + self.blip_radius;
        let band_end = self.radii[ring + 1] - self.blip_radius;

        let mut radius = uniform(rng, band_start, band_end);

        let angle = match sector {
            // No declared sectors: no wedge constraint, any angle works.
            None => rng.gen::<f64>() * TAU,
            Some(_) if self.angles.len() == 1 => {
                let margin = self.angular_margin(radius);
                let start = self.angles[0] + margin;
                let end = self.angles[0] + TAU - margin;
                radius = clamp(radius, band_start, band_end);
                clamp(uniform(rng, start, end), start, end)
            }
            Some(sector) => {
                let span = self.sector_span(sector);
                // A wedge too narrow for the circle pushes the usable band
                // outward; cap at the band's outer bound so a degenerate cell
                // collapses there instead of escaping the frame.
                let min_radius = self.blip_radius / (span / 2.0).sin();
                let adjusted_start = min_radius.max(band_start).min(band_end.max(band_start));

                radius = uniform(rng, adjusted_start, band_end);
                let margin = self.angular_margin(radius);
                let start = self.angles[sector] + margin;
                let end = (self.angles[sector] + span) - margin;

                radius = clamp(radius, adjusted_start, band_end);
                clamp(uniform(rng, start, end), start, end)
            }
        };

        (radius, angle)
    }
}
