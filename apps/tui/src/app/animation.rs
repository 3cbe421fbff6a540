#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SweepMode {
    Running,
    Paused,
}

const SWEEP_SPEED: f64 = 1.4;
const MAX_FRAME_DELTA: f64 = 0.25;
const FULL_ROTATION: f64 = std::f64::consts::TAU;

/// Advance the radar sweep by wall-clock time, clamping large frame gaps so
/// a stalled terminal doesn't make the sweep jump.
pub fn advance_sweep(
    counter: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: SweepMode,
) -> (f64, Option<f64>) {
    let delta = last_tick
        .map(|last| (now_seconds - last).max(0.0).min(MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    let next_counter = match mode {
        SweepMode::Running => delta.mul_add(SWEEP_SPEED, counter).rem_euclid(FULL_ROTATION),
        SweepMode::Paused => counter.rem_euclid(FULL_ROTATION),
    };

    (next_counter, Some(now_seconds))
}
