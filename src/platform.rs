/*!
Default implementations of the clock and rng used by timers.
*/

pub mod system_clock;

#[cfg(feature = "rand")]
pub mod rand_rng;

pub use self::system_clock::SystemClock;

#[cfg(feature = "rand")]
pub use self::rand_rng::RandRng;

/**
The source of randomness used for sampling when none is given.

Without the `rand` feature there's no default source, and sampled timers always write.
*/
#[cfg(feature = "rand")]
pub type DefaultRng = RandRng;
#[cfg(not(feature = "rand"))]
pub type DefaultRng = chronograph_core::empty::Empty;
