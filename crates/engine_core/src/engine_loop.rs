// crates/engine_core/src/engine_loop.rs

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::debug;

/// Window of recent ticks the fps average is computed over.
const FPS_SAMPLES: usize = 60;

/// Pacing knobs the scheduler exposes to live configuration.
pub trait RateControl {
    fn set_rate_limiter_enabled(&mut self, enabled: bool);
    fn set_target_rate(&mut self, rate: u32);
}

/// Fixed-frequency tick gate. The platform loop asks `poll` whether a tick is
/// due; when the rate limiter is off every poll ticks.
pub struct EngineLoop {
    target_rate: u32,
    rate_limiter_enabled: bool,
    last_tick: Option<Instant>,
    iteration_count: u64,
    recent_dts: VecDeque<f32>,
}

impl EngineLoop {
    pub fn new(target_rate: u32) -> Self {
        Self {
            target_rate: target_rate.max(1),
            rate_limiter_enabled: true,
            last_tick: None,
            iteration_count: 0,
            recent_dts: VecDeque::with_capacity(FPS_SAMPLES),
        }
    }

    pub fn target_rate(&self) -> u32 {
        self.target_rate
    }

    pub fn rate_limiter_enabled(&self) -> bool {
        self.rate_limiter_enabled
    }

    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    /// Time between ticks, or `None` while uncapped.
    pub fn tick_period(&self) -> Option<Duration> {
        self.rate_limiter_enabled
            .then(|| Duration::from_secs_f64(1.0 / self.target_rate as f64))
    }

    /// Earliest instant the next tick may run.
    pub fn next_deadline(&self) -> Option<Instant> {
        Some(self.last_tick? + self.tick_period()?)
    }

    /// Returns the elapsed time to simulate if a tick is due at `now`.
    /// The delta is clamped to 0.25s so breakpoints or window drags do not
    /// produce giant steps.
    pub fn poll(&mut self, now: Instant) -> Option<f32> {
        let dt = match self.last_tick {
            None => self.tick_period().map_or(0.0, |p| p.as_secs_f32()),
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                if self.tick_period().is_some_and(|period| elapsed < period) {
                    return None;
                }
                elapsed.as_secs_f32().min(0.25)
            }
        };

        self.last_tick = Some(now);
        self.iteration_count += 1;
        if self.recent_dts.len() == FPS_SAMPLES {
            self.recent_dts.pop_front();
        }
        self.recent_dts.push_back(dt);
        Some(dt)
    }

    /// Average ticks per second over the recent window.
    pub fn average_fps(&self) -> f32 {
        let total: f32 = self.recent_dts.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.recent_dts.len() as f32 / total
    }
}

impl RateControl for EngineLoop {
    fn set_rate_limiter_enabled(&mut self, enabled: bool) {
        if self.rate_limiter_enabled != enabled {
            debug!(enabled, "rate limiter toggled");
        }
        self.rate_limiter_enabled = enabled;
    }

    fn set_target_rate(&mut self, rate: u32) {
        self.target_rate = rate.max(1);
        debug!(rate = self.target_rate, "target tick rate set");
    }
}
