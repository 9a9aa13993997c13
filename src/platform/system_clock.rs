use std::time::Instant;

use chronograph_core::clock::Clock;

/**
A [`Clock`] based on [`Instant::now`].
*/
#[derive(Default, Debug, Clone, Copy)]
pub struct SystemClock {}

impl SystemClock {
    pub const fn new() -> Self {
        SystemClock {}
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Option<Instant> {
        Some(Instant::now())
    }
}
