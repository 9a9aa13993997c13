/*!
The [`Rng`] type.
*/

use crate::empty::Empty;

/**
A source of randomness.
*/
pub trait Rng {
    /**
    Generate a uniformly distributed random `u64`, or `None` if the source is unable to.
    */
    fn gen_u64(&self) -> Option<u64>;

    /**
    Generate a uniformly distributed integer in `1..=100`.
    */
    fn gen_percent(&self) -> Option<u32> {
        self.gen_u64().map(|n| (n % 100) as u32 + 1)
    }
}

impl<'a, T: Rng + ?Sized> Rng for &'a T {
    fn gen_u64(&self) -> Option<u64> {
        (**self).gen_u64()
    }

    fn gen_percent(&self) -> Option<u32> {
        (**self).gen_percent()
    }
}

impl<T: Rng> Rng for Option<T> {
    fn gen_u64(&self) -> Option<u64> {
        self.as_ref().and_then(|rng| rng.gen_u64())
    }

    fn gen_percent(&self) -> Option<u32> {
        self.as_ref().and_then(|rng| rng.gen_percent())
    }
}

impl<T: Rng + ?Sized> Rng for Box<T> {
    fn gen_u64(&self) -> Option<u64> {
        (**self).gen_u64()
    }

    fn gen_percent(&self) -> Option<u32> {
        (**self).gen_percent()
    }
}

impl Rng for Empty {
    fn gen_u64(&self) -> Option<u64> {
        None
    }
}
