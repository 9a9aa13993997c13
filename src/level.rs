/*!
The process-wide default event level.

Timers created by [`crate::timer`] and [`crate::time`] write their messages at this level. Changing it only affects timers created afterwards; existing timers keep the level they were created with.
*/

use std::sync::atomic::{AtomicU8, Ordering};

pub use chronograph_core::level::{Level, ParseLevelError};

static DEFAULT: AtomicU8 = AtomicU8::new(Level::Information.to_u8());

/**
Get the current default event level.
*/
pub fn default() -> Level {
    Level::from_u8(DEFAULT.load(Ordering::Relaxed)).unwrap_or_default()
}

/**
Set the default event level used by new timers.
*/
pub fn set_default(lvl: Level) {
    DEFAULT.store(lvl.to_u8(), Ordering::Relaxed);
}
