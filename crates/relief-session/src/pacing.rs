use std::thread;
use std::time::Duration;

use crate::config::SessionConfig;

/// Optional real-time pacing between search steps and reveal steps, so a
/// renderer can animate them. The algorithms themselves never sleep.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pacing {
    pub step: Duration,
    pub reveal: Duration,
}

impl Pacing {
    /// No pauses at all.
    pub const NONE: Self = Self {
        step: Duration::ZERO,
        reveal: Duration::ZERO,
    };

    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            step: config.step_delay,
            reveal: config.reveal_delay,
        }
    }

    #[inline]
    pub fn pause_step(&self) {
        pause(self.step);
    }

    #[inline]
    pub fn pause_reveal(&self) {
        pause(self.reveal);
    }
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}
