use std::time::Duration;

use crate::memory::PROGRAM_START;

/// What DRW does with sprite bits that land off the display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DrawPolicy {
    /// Pixels whose linear index is past the last cell are dropped. A sprite
    /// hanging off the right edge continues on the next row.
    #[default]
    Clip,
    /// Coordinates wrap to the opposite edge.
    Wrap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub draw_policy: DrawPolicy,
    pub timer_hz: u32,
    pub load_address: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            draw_policy: DrawPolicy::default(),
            timer_hz: 60,
            load_address: PROGRAM_START,
        }
    }
}

impl Config {
    pub fn draw_policy(mut self, policy: DrawPolicy) -> Self {
        self.draw_policy = policy;
        self
    }

    pub fn timer_hz(mut self, hz: u32) -> Self {
        self.timer_hz = hz.max(1);
        self
    }

    pub fn load_address(mut self, address: u16) -> Self {
        self.load_address = address;
        self
    }

    pub fn timer_period(&self) -> Duration {
        Duration::from_secs(1) / self.timer_hz.max(1)
    }
}
