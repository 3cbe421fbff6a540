pub mod anneal;
mod energy;
mod sampler;

use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::color::{ColorBy, InheritedColor, OrdinalColors};
use crate::data::RadarData;
use crate::error::LayoutError;
use crate::frame::RadarFrame;
pub use anneal::{AnnealingSchedule, AnnealingStats};
use sampler::{polar_to_cartesian, CellSampler};

/// How much of the outer radius one blip circle takes up.
const BLIP_RADIUS_FRACTION: f64 = 1.0 / 20.0;

/// Knobs for one packing run. The defaults reproduce the stock chart:
/// depth-keyed ordinal colors and the fixed annealing budget.
#[derive(Debug, Clone)]
pub struct PackingOptions {
    /// Inflates the uniform blip display radius.
    pub padding: f64,
    pub color_by: ColorBy,
    pub palette: Vec<String>,
    pub inherit_color_from_parent: bool,
    pub child_color: InheritedColor,
    pub schedule: AnnealingSchedule,
}

impl Default for PackingOptions {
    fn default() -> Self {
        Self {
            padding: 1.0,
            color_by: ColorBy::default(),
            palette: crate::color::DEFAULT_PALETTE
                .iter()
                .map(ToString::to_string)
                .collect(),
            inherit_color_from_parent: false,
            child_color: InheritedColor::default(),
            schedule: AnnealingSchedule::default(),
        }
    }
}

/// A positioned, colored blip node. `index` points back into the input blip
/// list; `depth` is 1 for parentless blips and 2 otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackedBlip {
    pub id: String,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    pub depth: u32,
}

/// Output of [`pack_blips`]: the positioned nodes in input order plus the
/// refinement run summary.
#[derive(Debug, Clone)]
pub struct PackedLayout {
    pub blips: Vec<PackedBlip>,
    pub stats: AnnealingStats,
}

/// Compute a collision-minimized position for every blip inside its
/// sector/ring cell.
///
/// Validation happens before any sampling: a blip naming an undeclared ring
/// or sector fails the whole batch. The one exception is an empty declared
/// sector list, which means there is no wedge constraint and sector
/// references are ignored.
///
/// The caller owns the random source; seeding it makes the run reproducible.
pub fn pack_blips(
    data: &RadarData,
    frame: &RadarFrame,
    options: &PackingOptions,
    rng: &mut impl Rng,
) -> Result<PackedLayout, LayoutError> {
    if frame.radii.len() != data.rings.len() + 1 {
        return Err(LayoutError::InvalidConfiguration(format!(
            "frame has {} ring boundaries for {} declared rings",
            frame.radii.len(),
            data.rings.len()
        )));
    }
    if !data.sectors.is_empty() && frame.angles.len() != data.sectors.len() {
        return Err(LayoutError::InvalidConfiguration(format!(
            "frame has {} sector angles for {} declared sectors",
            frame.angles.len(),
            data.sectors.len()
        )));
    }

    let blip_radius = frame
        .radii
        .iter()
        .copied()
        .fold(0.0, f64::max)
        .mul_add(BLIP_RADIUS_FRACTION, options.padding);

    let sector_indices: HashMap<&str, usize> = data
        .sectors
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index))
        .collect();
    let ring_indices: HashMap<&str, usize> = data
        .rings
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index))
        .collect();
    let node_indices: HashMap<&str, usize> = data
        .blips
        .iter()
        .enumerate()
        .map(|(index, blip)| (blip.id.as_str(), index))
        .collect();

    let mut cells = Vec::with_capacity(data.blips.len());
    for blip in &data.blips {
        let ring = ring_indices
            .get(blip.ring.as_str())
            .copied()
            .ok_or_else(|| LayoutError::UnknownRing {
                blip: blip.id.clone(),
                ring: blip.ring.clone(),
            })?;
        let sector = if data.sectors.is_empty() {
            None
        } else {
            Some(
                sector_indices
                    .get(blip.sector.as_str())
                    .copied()
                    .ok_or_else(|| LayoutError::UnknownSector {
                        blip: blip.id.clone(),
                        sector: blip.sector.clone(),
                    })?,
            )
        };
        cells.push((ring, sector));
    }

    let sampler = CellSampler::new(&frame.radii, &frame.angles, blip_radius);
    let center = (frame.center_x, frame.center_y);

    let mut positions: Vec<(f64, f64)> = cells
        .iter()
        .map(|&(ring, sector)| {
            let (radius, angle) = sampler.sample(ring, sector, rng);
            polar_to_cartesian(center.0, center.1, radius, angle)
        })
        .collect();

    let stats = anneal::refine(
        &mut positions,
        &cells,
        &sampler,
        center,
        &options.schedule,
        rng,
    );

    let mut scale = OrdinalColors::new(options.palette.clone());
    let mut blips: Vec<PackedBlip> = data
        .blips
        .iter()
        .zip(&positions)
        .enumerate()
        .map(|(index, (blip, &(x, y)))| {
            let depth = if blip.parent.is_some() { 2 } else { 1 };
            let key = match options.color_by {
                ColorBy::Depth => depth.to_string(),
                ColorBy::Id => blip.id.clone(),
                ColorBy::Sector => blip.sector.clone(),
            };
            PackedBlip {
                id: blip.id.clone(),
                index,
                x,
                y,
                radius: blip_radius,
                color: scale.resolve(&key),
                depth,
            }
        })
        .collect();

    if options.inherit_color_from_parent {
        for index in 0..blips.len() {
            if blips[index].depth > 1 {
                let parent = data.blips[index]
                    .parent
                    .as_deref()
                    .and_then(|id| node_indices.get(id));
                // A missing parent keeps the ordinal color.
                if let Some(&parent) = parent {
                    blips[index].color = options.child_color.resolve(&blips[parent].color);
                }
            }
        }
    }

    debug!(
        blip_count = blips.len(),
        blip_radius,
        best_energy = stats.best_energy,
        "packed radar layout"
    );
    Ok(PackedLayout { blips, stats })
}

#[cfg(test)]
mod tests {
    use super::{pack_blips, PackedLayout, PackingOptions};
    use crate::color::{ColorBy, InheritedColor};
    use crate::data::{Blip, RadarData};
    use crate::error::LayoutError;
    use crate::frame::RadarFrame;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::TAU;

    fn four_by_three() -> (RadarData, RadarFrame) {
        let data = RadarData {
            sectors: vec![
                "platforms".to_string(),
                "languages".to_string(),
                "tools".to_string(),
                "techniques".to_string(),
            ],
            rings: vec![
                "adopt".to_string(),
                "trial".to_string(),
                "assess".to_string(),
            ],
            blips: Vec::new(),
        };
        let frame = RadarFrame::compute(4, 3, 0.0, 500.0, 500.0).unwrap();
        (data, frame)
    }

    fn pack(data: &RadarData, frame: &RadarFrame, seed: u64) -> PackedLayout {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        pack_blips(data, frame, &PackingOptions::default(), &mut rng).unwrap()
    }

    /// Angle of a packed blip around the frame center, normalized into
    /// `[base, base + 2π)`.
    fn angle_from(frame: &RadarFrame, x: f64, y: f64, base: f64) -> f64 {
        let raw = (y - frame.center_y).atan2(x - frame.center_x);
        let mut angle = raw;
        while angle < base {
            angle += TAU;
        }
        while angle >= base + TAU {
            angle -= TAU;
        }
        angle
    }

    #[test]
    fn single_blip_lands_inside_its_ring_band_with_zero_energy() {
        let data = RadarData {
            sectors: vec!["s0".to_string()],
            rings: vec!["r0".to_string()],
            blips: vec![Blip::new("only", "s0", "r0")],
        };
        let frame = RadarFrame::compute(1, 1, 0.0, 500.0, 500.0).unwrap();
        let layout = pack(&data, &frame, 5);

        assert_eq!(layout.blips.len(), 1);
        let blip = &layout.blips[0];
        let distance = (blip.x - frame.center_x).hypot(blip.y - frame.center_y);
        assert!(distance >= blip.radius - 1e-9);
        assert!(distance <= frame.radius - blip.radius + 1e-9);
        assert!((layout.stats.best_energy).abs() < f64::EPSILON);
    }

    #[test]
    fn crowded_cell_unpacks_within_its_sector_and_ring() {
        let (mut data, frame) = four_by_three();
        data.blips = (0..20)
            .map(|i| Blip::new(format!("blip-{i}"), "tools", "trial"))
            .collect();

        let layout = pack(&data, &frame, 42);
        let blip_radius = layout.blips[0].radius;

        // Sector index 2, ring index 1.
        let sector_start = frame.angles[2];
        let sector_end = frame.angles[3];
        for blip in &layout.blips {
            let distance = (blip.x - frame.center_x).hypot(blip.y - frame.center_y);
            assert!(distance >= frame.radii[1] + blip_radius - 1e-9);
            assert!(distance <= frame.radii[2] - blip_radius + 1e-9);

            let angle = angle_from(&frame, blip.x, blip.y, sector_start);
            assert!(angle >= sector_start - 1e-9);
            assert!(angle <= sector_end + 1e-9);
        }

        assert!(layout.stats.best_energy < layout.stats.initial_energy);
        for pair in layout.stats.best_energy_history.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn full_circle_sector_does_not_produce_nan_positions() {
        let data = RadarData {
            sectors: vec!["all".to_string()],
            rings: vec!["inner".to_string(), "outer".to_string()],
            blips: (0..5)
                .map(|i| Blip::new(format!("blip-{i}"), "all", "outer"))
                .collect(),
        };
        let frame = RadarFrame::compute(1, 2, 0.0, 400.0, 400.0).unwrap();
        let layout = pack(&data, &frame, 8);

        for blip in &layout.blips {
            assert!(blip.x.is_finite() && blip.y.is_finite());
        }
    }

    #[test]
    fn seeded_runs_produce_identical_layouts() {
        let (mut data, frame) = four_by_three();
        data.blips = (0..10)
            .map(|i| Blip::new(format!("blip-{i}"), "languages", "adopt"))
            .collect();

        let first = pack(&data, &frame, 1234);
        let second = pack(&data, &frame, 1234);

        assert_eq!(first.blips, second.blips);
    }

    #[test]
    fn unknown_ring_fails_the_whole_batch() {
        let (mut data, frame) = four_by_three();
        data.blips = vec![Blip::new("stray", "tools", "retired")];

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = pack_blips(&data, &frame, &PackingOptions::default(), &mut rng);

        assert_eq!(
            result.err(),
            Some(LayoutError::UnknownRing {
                blip: "stray".to_string(),
                ring: "retired".to_string(),
            })
        );
    }

    #[test]
    fn unknown_sector_fails_the_whole_batch() {
        let (mut data, frame) = four_by_three();
        data.blips = vec![Blip::new("stray", "desserts", "trial")];

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = pack_blips(&data, &frame, &PackingOptions::default(), &mut rng);

        assert_eq!(
            result.err(),
            Some(LayoutError::UnknownSector {
                blip: "stray".to_string(),
                sector: "desserts".to_string(),
            })
        );
    }

    #[test]
    fn empty_sector_list_skips_sector_validation() {
        let data = RadarData {
            sectors: Vec::new(),
            rings: vec!["only".to_string()],
            blips: vec![Blip::new("free", "anything", "only")],
        };
        // The frame still needs a sector count; the engine ignores its wedge
        // when no sectors are declared.
        let frame = RadarFrame::compute(1, 1, 0.0, 300.0, 300.0).unwrap();
        let layout = pack(&data, &frame, 3);

        assert_eq!(layout.blips.len(), 1);
        assert!(layout.blips[0].x.is_finite());
    }

    #[test]
    fn mismatched_frame_and_data_are_rejected() {
        let (mut data, _) = four_by_three();
        data.blips = vec![Blip::new("one", "platforms", "adopt")];
        // Frame built for a different radar shape.
        let frame = RadarFrame::compute(4, 5, 0.0, 500.0, 500.0).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = pack_blips(&data, &frame, &PackingOptions::default(), &mut rng);

        assert!(matches!(
            result,
            Err(LayoutError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn blips_keep_input_order_and_indices() {
        let (mut data, frame) = four_by_three();
        data.blips = vec![
            Blip::new("first", "platforms", "adopt"),
            Blip::new("second", "tools", "assess"),
        ];

        let layout = pack(&data, &frame, 6);
        assert_eq!(layout.blips[0].id, "first");
        assert_eq!(layout.blips[0].index, 0);
        assert_eq!(layout.blips[1].id, "second");
        assert_eq!(layout.blips[1].index, 1);
    }

    #[test]
    fn blip_radius_is_a_twentieth_of_the_outer_radius_plus_padding() {
        let (mut data, frame) = four_by_three();
        data.blips = vec![Blip::new("one", "platforms", "adopt")];

        let layout = pack(&data, &frame, 9);
        let expected = frame.radius / 20.0 + 1.0;
        assert!((layout.blips[0].radius - expected).abs() < 1e-9);
    }

    #[test]
    fn inherited_color_comes_from_the_parent_rule() {
        let (mut data, frame) = four_by_three();
        let mut child = Blip::new("child", "tools", "trial");
        child.parent = Some("parent".to_string());
        data.blips = vec![Blip::new("parent", "tools", "adopt"), child];

        let options = PackingOptions {
            color_by: ColorBy::Id,
            inherit_color_from_parent: true,
            ..PackingOptions::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let layout = pack_blips(&data, &frame, &options, &mut rng).unwrap();

        let parent_color = &layout.blips[0].color;
        let expected = InheritedColor::default().resolve(parent_color);
        assert_eq!(layout.blips[1].color, expected);
        assert_ne!(layout.blips[1].color, *parent_color);
    }

    #[test]
    fn missing_parent_falls_back_to_the_ordinal_color() {
        let (mut data, frame) = four_by_three();
        let mut orphan = Blip::new("orphan", "tools", "trial");
        orphan.parent = Some("vanished".to_string());
        data.blips = vec![orphan];

        let options = PackingOptions {
            color_by: ColorBy::Id,
            inherit_color_from_parent: true,
            ..PackingOptions::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let layout = pack_blips(&data, &frame, &options, &mut rng).unwrap();

        assert_eq!(layout.blips[0].color, crate::color::DEFAULT_PALETTE[0]);
    }
}
