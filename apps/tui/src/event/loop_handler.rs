use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use crate::app::{handle_input, App};
use crate::db::queries::{count_blips, count_blips_by_ring, count_blips_by_sector};
use crate::ui;
use techradar_layout::PackedBlip;

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Event poll timeout (ms); the loop also drives the sweep animation.
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                _ => {
                    // Ignore other events
                }
            }
        }
    }
    Ok(())
}

/// Compute one layout and print it without a UI.
pub async fn run_headless(app: &App, json: bool) -> Result<()> {
    let stats = build_headless_layout(app).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(&stats);
    }

    Ok(())
}

fn render_headless_stats(stats: &HeadlessLayout<'_>) {
    println!("\nTech Radar Layout");
    println!("==================");
    println!("Seed: {}", stats.seed);
    println!("Total blips: {}", stats.total_blips);
    if stats.skipped_blips > 0 {
        println!("Skipped (no matching cell): {}", stats.skipped_blips);
    }
    println!(
        "Overlap energy: {:.3} -> {:.3} over {} iterations",
        stats.initial_energy, stats.best_energy, stats.iterations
    );

    println!("\nBlips by Sector:");
    for (sector, count) in &stats.by_sector {
        println!("- {sector}: {count}");
    }

    println!("\nBlips by Ring:");
    for (ring, count) in &stats.by_ring {
        println!("- {ring}: {count}");
    }

    println!("\nPositions:");
    for blip in stats.blips {
        println!(
            "- {} @ ({:.1}, {:.1}) r={:.1} {}",
            blip.id, blip.x, blip.y, blip.radius, blip.color
        );
    }
}

async fn build_headless_layout(app: &App) -> Result<HeadlessLayout<'_>> {
    let layout = app
        .layout
        .as_ref()
        .ok_or_else(|| color_eyre::eyre::eyre!("no layout available"))?;

    // Counts come from the database when one is connected, matching what the
    // UI sidebar would show; otherwise they are derived from the loaded rows.
    let (total_blips, by_sector, by_ring) = if let Some(pool) = app.pool.as_ref() {
        (
            count_blips(pool).await?,
            count_blips_by_sector(pool).await?,
            count_blips_by_ring(pool).await?,
        )
    } else {
        counts_from_records(app)
    };

    Ok(HeadlessLayout {
        seed: app.layout_seed,
        sectors: &app.settings.sectors,
        rings: &app.settings.rings,
        total_blips,
        skipped_blips: app.skipped_records,
        iterations: layout.stats.iterations,
        initial_energy: layout.stats.initial_energy,
        best_energy: layout.stats.best_energy,
        by_sector,
        by_ring,
        blips: &layout.blips,
    })
}

#[allow(clippy::cast_possible_wrap)]
fn counts_from_records(app: &App) -> (i64, Vec<(String, i64)>, Vec<(String, i64)>) {
    let mut by_sector: Vec<(String, i64)> = Vec::new();
    let mut by_ring: Vec<(String, i64)> = Vec::new();

    for record in &app.blips {
        if let Some(sector) = record.sector.as_deref() {
            bump(&mut by_sector, sector);
        }
        if let Some(ring) = record.ring.as_deref() {
            bump(&mut by_ring, ring);
        }
    }

    (app.blips.len() as i64, by_sector, by_ring)
}

fn bump(counts: &mut Vec<(String, i64)>, key: &str) {
    if let Some(entry) = counts.iter_mut().find(|(name, _)| name == key) {
        entry.1 += 1;
    } else {
        counts.push((key.to_string(), 1));
    }
}

#[derive(serde::Serialize)]
struct HeadlessLayout<'a> {
    seed: u64,
    sectors: &'a [String],
    rings: &'a [String],
    total_blips: i64,
    skipped_blips: usize,
    iterations: usize,
    initial_energy: f64,
    best_energy: f64,
    by_sector: Vec<(String, i64)>,
    by_ring: Vec<(String, i64)>,
    blips: &'a [PackedBlip],
}
