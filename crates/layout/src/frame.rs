use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::LayoutError;

/// Circular frame geometry derived once per render pass from sector/ring
/// counts and the available drawing area.
///
/// Ring boundary radii are ascending from the center with a synthesized zero
/// inner boundary: `radii.len() == ring_count + 1`, `radii[0] == 0.0`, and
/// `radii[i] = radius * i / ring_count`. Sector `i` spans
/// `[angles[i], angles[i + 1])`, with the last sector wrapping back to
/// `angles[0] + 2π`; sector 0 starts pointing up.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarFrame {
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub angle_step: f64,
    pub radii: Vec<f64>,
    pub angles: Vec<f64>,
    /// Sector bisectors, where sector labels are anchored.
    pub label_angles: Vec<f64>,
}

impl RadarFrame {
    /// Pure function of its inputs: identical arguments give bit-identical
    /// frames.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(
        sector_count: usize,
        ring_count: usize,
        rotation_degrees: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, LayoutError> {
        if sector_count == 0 {
            return Err(LayoutError::InvalidConfiguration(
                "sector count must be at least 1".to_string(),
            ));
        }
        if ring_count == 0 {
            return Err(LayoutError::InvalidConfiguration(
                "ring count must be at least 1".to_string(),
            ));
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LayoutError::InvalidConfiguration(format!(
                "drawing area {width}x{height} is not usable"
            )));
        }

        let radius = width.min(height) / 2.0;
        let rotation = rotation_degrees.to_radians();
        let angle_step = TAU / sector_count as f64;

        let radii = (0..=ring_count)
            .map(|i| radius * (i as f64 / ring_count as f64))
            .collect();
        let angles: Vec<f64> = (0..sector_count)
            .map(|i| (i as f64).mul_add(angle_step, rotation) - FRAC_PI_2)
            .collect();
        let label_angles = angles.iter().map(|angle| angle + angle_step / 2.0).collect();

        Ok(Self {
            radius,
            center_x: width / 2.0,
            center_y: height / 2.0,
            angle_step,
            radii,
            angles,
            label_angles,
        })
    }

    /// Outermost ring boundary, equal to `radius` by construction.
    pub fn outer_radius(&self) -> f64 {
        self.radii.last().copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RadarFrame;
    use crate::error::LayoutError;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn radii_ascend_from_a_zero_inner_boundary() {
        let frame = RadarFrame::compute(4, 4, 0.0, 500.0, 500.0).unwrap();

        assert_eq!(frame.radii.len(), 5);
        assert_close(frame.radii[0], 0.0);
        assert_close(frame.radii[2], 125.0);
        assert_close(frame.radii[4], 250.0);
        assert_close(frame.outer_radius(), frame.radius);
    }

    #[test]
    fn radius_uses_the_minor_dimension() {
        let frame = RadarFrame::compute(4, 3, 0.0, 800.0, 400.0).unwrap();

        assert_close(frame.radius, 200.0);
        assert_close(frame.center_x, 400.0);
        assert_close(frame.center_y, 200.0);
    }

    #[test]
    fn sector_zero_starts_pointing_up() {
        let frame = RadarFrame::compute(4, 3, 0.0, 500.0, 500.0).unwrap();

        assert_close(frame.angle_step, FRAC_PI_2);
        assert_close(frame.angles[0], -FRAC_PI_2);
        assert_close(frame.angles[2], FRAC_PI_2);
        assert_close(frame.label_angles[0], -FRAC_PI_2 + FRAC_PI_2 / 2.0);
    }

    #[test]
    fn rotation_is_given_in_degrees() {
        let frame = RadarFrame::compute(2, 1, 90.0, 100.0, 100.0).unwrap();

        // rotation π/2 cancels the -π/2 offset for sector 0.
        assert_close(frame.angles[0], 0.0);
        assert_close(frame.angles[1], PI);
        assert_close(frame.angle_step, TAU / 2.0);
    }

    #[test]
    fn identical_inputs_give_bit_identical_frames() {
        let a = RadarFrame::compute(7, 5, 33.0, 641.0, 480.0).unwrap();
        let b = RadarFrame::compute(7, 5, 33.0, 641.0, 480.0).unwrap();

        assert_eq!(a.radii, b.radii);
        assert_eq!(a.angles, b.angles);
        assert_eq!(a.label_angles, b.label_angles);
    }

    #[test]
    fn zero_sectors_are_rejected() {
        let result = RadarFrame::compute(0, 3, 0.0, 500.0, 500.0);
        assert!(matches!(result, Err(LayoutError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_rings_are_rejected() {
        let result = RadarFrame::compute(4, 0, 0.0, 500.0, 500.0);
        assert!(matches!(result, Err(LayoutError::InvalidConfiguration(_))));
    }

    #[test]
    fn empty_drawing_area_is_rejected() {
        let result = RadarFrame::compute(4, 3, 0.0, 0.0, 500.0);
        assert!(matches!(result, Err(LayoutError::InvalidConfiguration(_))));
    }
}
