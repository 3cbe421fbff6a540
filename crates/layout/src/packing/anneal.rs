use rand::Rng;
use tracing::debug;

use super::energy::total_overlap;
use super::sampler::{polar_to_cartesian, CellSampler};

/// Temperature schedule for the refinement loop. The defaults give a fixed
/// budget of roughly 2300 iterations regardless of blip count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingSchedule {
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub final_temperature: f64,
}

impl Default for AnnealingSchedule {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.003,
            final_temperature: 1.0,
        }
    }
}

/// Run summary. `best_energy_history` records each new best as it is found,
/// so it is non-increasing by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnealingStats {
    pub iterations: usize,
    pub initial_energy: f64,
    pub best_energy: f64,
    pub best_energy_history: Vec<f64>,
}

/// Metropolis refinement of an initial solution: each iteration redraws one
/// blip's position with the same cell-bounded sampling used for initial
/// placement, keeps it when energy drops and with probability
/// `exp(-Δ / temperature)` otherwise, then cools multiplicatively.
///
/// `positions` is mutated in place and holds the best solution observed over
/// the whole run on return, which is not necessarily the last accepted one.
pub(crate) fn refine(
    positions: &mut [(f64, f64)],
    cells: &[(usize, Option<usize>)],
    sampler: &CellSampler<'_>,
    center: (f64, f64),
    schedule: &AnnealingSchedule,
    rng: &mut impl Rng,
) -> AnnealingStats {
    let initial_energy = total_overlap(positions, sampler.blip_radius());
    let mut stats = AnnealingStats {
        initial_energy,
        best_energy: initial_energy,
        ..AnnealingStats::default()
    };
    if positions.is_empty() {
        return stats;
    }

    let mut best = positions.to_vec();
    let mut current_energy = initial_energy;
    let mut temperature = schedule.initial_temperature;

    while temperature > schedule.final_temperature {
        let index = rng.gen_range(0..positions.len());
        let previous = positions[index];

        let (ring, sector) = cells[index];
        let (radius, angle) = sampler.sample(ring, sector, rng);
        positions[index] = polar_to_cartesian(center.0, center.1, radius, angle);

        let candidate_energy = total_overlap(positions, sampler.blip_radius());
        let delta = candidate_energy - current_energy;

        if delta < 0.0 || (-delta / temperature).exp() > rng.gen::<f64>() {
            current_energy = candidate_energy;
            if candidate_energy < stats.best_energy {
                stats.best_energy = candidate_energy;
                stats.best_energy_history.push(candidate_energy);
                best.copy_from_slice(positions);
            }
        } else {
            positions[index] = previous;
        }

        temperature *= 1.0 - schedule.cooling_rate;
        stats.iterations += 1;
    }

    positions.copy_from_slice(&best);
    debug!(
        iterations = stats.iterations,
        initial_energy = stats.initial_energy,
        best_energy = stats.best_energy,
        "annealing finished"
    );
    stats
}
