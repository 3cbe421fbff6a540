use std::time::Instant;

use color_eyre::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sqlx::SqlitePool;
use tracing::warn;

use crate::app::animation::{advance_sweep, SweepMode};
use crate::config::RadarSettings;
use crate::db::models::BlipRecord;
use crate::db::queries::get_blips;
use crate::db::{create_database_pool, demo_blips, seed_demo_blips};
use techradar_layout::{
    pack_blips, Blip, ColorBy, PackedLayout, PackingOptions, RadarData, RadarFrame,
};

/// Side length of the virtual drawing area the layout is computed in; the
/// canvas maps it onto whatever terminal rectangle is available.
pub const CANVAS_SIZE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Radar,
    Blips,
    Help,
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub settings: RadarSettings,
    /// All rows loaded from the database (or the demo fallback).
    pub blips: Vec<BlipRecord>,
    /// Packed layout for the rows that matched the configured radar, plus
    /// the frame it was computed against.
    pub layout: Option<PackedLayout>,
    pub frame: Option<RadarFrame>,
    /// For each packed blip, the index of its row in `blips`.
    pub visible_records: Vec<usize>,
    pub skipped_records: usize,
    pub layout_seed: u64,
    pub selected_index: usize,
    pub status_message: String,
    pub sweep_mode: SweepMode,
    pub animation_counter: f64,
    last_tick: Option<f64>,
    started_at: Instant,
    pub pool: Option<SqlitePool>,
}

impl App {
    pub fn new(settings: RadarSettings, seed: u64) -> Self {
        Self {
            running: true,
            screen: AppScreen::Radar,
            settings,
            blips: Vec::new(),
            layout: None,
            frame: None,
            visible_records: Vec::new(),
            skipped_records: 0,
            layout_seed: seed,
            selected_index: 0,
            status_message: String::new(),
            sweep_mode: SweepMode::Running,
            animation_counter: 0.0,
            last_tick: None,
            started_at: Instant::now(),
            pool: None,
        }
    }

    /// Connect, migrate, seed an empty table, and load the blips.
    pub async fn initialize_db(&mut self, database_url: &str) -> Result<()> {
        let pool = create_database_pool(database_url).await?;
        seed_demo_blips(&pool).await?;
        self.blips = get_blips(&pool).await?;
        self.pool = Some(pool);
        self.compute_layout();
        Ok(())
    }

    /// In-memory demo data for when the database is unavailable.
    pub fn load_fallback_blips(&mut self) {
        self.blips = demo_blips()
            .into_iter()
            .enumerate()
            .map(|(index, blip)| {
                let id = i32::try_from(index + 1).unwrap_or(i32::MAX);
                BlipRecord {
                    id,
                    name: blip.name,
                    sector: Some(blip.sector),
                    ring: Some(blip.ring),
                    description: Some(blip.description),
                    created: blip.created,
                }
            })
            .collect();
        self.compute_layout();
    }

    /// Recompute the packed layout for the current rows and seed. Rows that
    /// don't match the configured radar are skipped with a warning; the
    /// engine itself stays strict.
    pub fn compute_layout(&mut self) {
        let frame = match RadarFrame::compute(
            self.settings.sectors.len(),
            self.settings.rings.len(),
            self.settings.rotation_degrees,
            CANVAS_SIZE,
            CANVAS_SIZE,
        ) {
            Ok(frame) => frame,
            Err(e) => {
                self.status_message = format!("Error: {e}");
                return;
            }
        };

        let mut data = RadarData {
            sectors: self.settings.sectors.clone(),
            rings: self.settings.rings.clone(),
            blips: Vec::new(),
        };
        let mut visible = Vec::new();
        let mut skipped = 0;
        for (index, record) in self.blips.iter().enumerate() {
            let cell = record.sector.as_deref().zip(record.ring.as_deref());
            let Some((sector, ring)) = cell else {
                skipped += 1;
                continue;
            };
            if !data.sectors.iter().any(|s| s == sector)
                || !data.rings.iter().any(|r| r == ring)
            {
                warn!(
                    name = %record.name,
                    sector,
                    ring,
                    "blip does not match the configured radar, skipping"
                );
                skipped += 1;
                continue;
            }
            data.blips.push(Blip::new(record.name.clone(), sector, ring));
            visible.push(index);
        }

        let options = PackingOptions {
            color_by: ColorBy::Sector,
            ..PackingOptions::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(self.layout_seed);
        match pack_blips(&data, &frame, &options, &mut rng) {
            Ok(layout) => {
                self.status_message = format!(
                    "Packed {} blips (seed {}, residual overlap {:.2})",
                    layout.blips.len(),
                    self.layout_seed,
                    layout.stats.best_energy
                );
                if skipped > 0 {
                    self.status_message
                        .push_str(&format!(", {skipped} skipped"));
                }
                self.layout = Some(layout);
                self.frame = Some(frame);
                self.visible_records = visible;
                self.skipped_records = skipped;
                self.clamp_selection();
            }
            Err(e) => {
                self.status_message = format!("Error: {e}");
            }
        }
    }

    /// Re-run the packing with a fresh seed.
    pub fn reroll_layout(&mut self) {
        self.layout_seed = rand::random();
        self.compute_layout();
    }

    pub fn update(&mut self) {
        let now = self.started_at.elapsed().as_secs_f64();
        let (counter, last_tick) =
            advance_sweep(self.animation_counter, self.last_tick, now, self.sweep_mode);
        self.animation_counter = counter;
        self.last_tick = last_tick;
    }

    pub fn toggle_sweep(&mut self) {
        self.sweep_mode = match self.sweep_mode {
            SweepMode::Running => SweepMode::Paused,
            SweepMode::Paused => SweepMode::Running,
        };
    }

    pub fn packed_count(&self) -> usize {
        self.layout.as_ref().map_or(0, |layout| layout.blips.len())
    }

    /// The database row behind the currently selected packed blip.
    pub fn selected_record(&self) -> Option<&BlipRecord> {
        self.visible_records
            .get(self.selected_index)
            .and_then(|&index| self.blips.get(index))
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.packed_count() {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.packed_count().saturating_sub(1);
    }

    pub fn jump_forward(&mut self, rows: usize) {
        let last = self.packed_count().saturating_sub(1);
        self.selected_index = (self.selected_index + rows).min(last);
    }

    pub fn jump_backward(&mut self, rows: usize) {
        self.selected_index = self.selected_index.saturating_sub(rows);
    }

    fn clamp_selection(&mut self) {
        let last = self.packed_count().saturating_sub(1);
        self.selected_index = self.selected_index.min(last);
    }
}

#[cfg(test)]
mod tests {
    use super::{App, CANVAS_SIZE};
    use crate::config::RadarSettings;
    use crate::db::models::BlipRecord;

    fn record(id: i32, name: &str, sector: &str, ring: &str) -> BlipRecord {
        BlipRecord {
            id,
            name: name.to_string(),
            sector: Some(sector.to_string()),
            ring: Some(ring.to_string()),
            description: None,
            created: "2026-08-05".to_string(),
        }
    }

    #[test]
    fn layout_skips_rows_that_do_not_match_the_radar() {
        let mut app = App::new(RadarSettings::default(), 7);
        app.blips = vec![
            record(1, "Rust", "languages", "adopt"),
            record(2, "Mystery", "desserts", "adopt"),
            record(3, "Terraform", "tools", "trial"),
        ];

        app.compute_layout();

        assert_eq!(app.packed_count(), 2);
        assert_eq!(app.skipped_records, 1);
        assert_eq!(app.visible_records, vec![0, 2]);
    }

    #[test]
    fn identical_seeds_give_identical_layouts() {
        let mut app = App::new(RadarSettings::default(), 99);
        app.blips = (0..8)
            .map(|i| record(i, &format!("blip-{i}"), "tools", "assess"))
            .collect();

        app.compute_layout();
        let first: Vec<(f64, f64)> = app
            .layout
            .as_ref()
            .unwrap()
            .blips
            .iter()
            .map(|blip| (blip.x, blip.y))
            .collect();

        app.compute_layout();
        let second: Vec<(f64, f64)> = app
            .layout
            .as_ref()
            .unwrap()
            .blips
            .iter()
            .map(|blip| (blip.x, blip.y))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn packed_positions_stay_inside_the_virtual_canvas() {
        let mut app = App::new(RadarSettings::default(), 3);
        app.load_fallback_blips();

        let layout = app.layout.as_ref().unwrap();
        assert!(!layout.blips.is_empty());
        for blip in &layout.blips {
            assert!(blip.x >= 0.0 && blip.x <= CANVAS_SIZE);
            assert!(blip.y >= 0.0 && blip.y <= CANVAS_SIZE);
        }
    }

    #[test]
    fn selection_clamps_to_the_packed_list() {
        let mut app = App::new(RadarSettings::default(), 1);
        app.blips = vec![
            record(1, "Rust", "languages", "adopt"),
            record(2, "Nix", "tools", "trial"),
        ];
        app.compute_layout();

        app.select_last();
        assert_eq!(app.selected_index, 1);
        app.select_next();
        assert_eq!(app.selected_index, 1);
        app.jump_backward(5);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_record().map(|r| r.name.as_str()), Some("Rust"));
    }
}
