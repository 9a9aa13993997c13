/*!
The [`RandRng`] type.
*/

use chronograph_core::rng::Rng;
use rand::Rng as _;

/**
An [`Rng`] based on the [`rand`] library.
*/
#[derive(Default, Debug, Clone, Copy)]
pub struct RandRng {}

impl RandRng {
    /**
    Create a new source of randomness.
    */
    pub const fn new() -> Self {
        RandRng {}
    }
}

impl Rng for RandRng {
    fn gen_u64(&self) -> Option<u64> {
        Some(rand::thread_rng().gen())
    }

    fn gen_percent(&self) -> Option<u32> {
        Some(rand::thread_rng().gen_range(1..=100))
    }
}
