/*!
The [`Clock`] type.
*/

use std::time::Instant;

use crate::empty::Empty;

/**
A monotonic source of time.

Clocks only need to be consistent with themselves; timers only ever subtract two readings from the same clock.
*/
pub trait Clock {
    /**
    Read the current time.

    If the clock is unable to produce a reading then `None` is returned, and any intervals that depend on it are treated as empty.
    */
    fn now(&self) -> Option<Instant>;
}

impl<'a, T: Clock + ?Sized> Clock for &'a T {
    fn now(&self) -> Option<Instant> {
        (**self).now()
    }
}

impl<T: Clock> Clock for Option<T> {
    fn now(&self) -> Option<Instant> {
        match self {
            Some(clock) => clock.now(),
            None => Empty.now(),
        }
    }
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn now(&self) -> Option<Instant> {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> Option<Instant> {
        (**self).now()
    }
}

impl Clock for Empty {
    fn now(&self) -> Option<Instant> {
        None
    }
}
