/*!
Message sampling.

A sampled timer decides once, when sampling is configured, whether it will write its ordinary messages. The decision isn't re-rolled for each message, so a timer either writes both its start and finish messages or neither.
*/

use chronograph_core::rng::Rng;

/**
Decide whether a timer with the given sampling factor should write its messages.

The factor is a percentage. A factor of `0` never writes, `100` or more always writes, and anything in between writes when a uniform draw from `1..=100` is at most the factor. If `rng` can't produce a value then messages are written.
*/
pub fn should_write(factor: u32, rng: impl Rng) -> bool {
    match factor {
        0 => false,
        100..=u32::MAX => true,
        factor => rng.gen_percent().map_or(true, |draw| draw <= factor),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;

    use super::*;

    use chronograph_core::empty::Empty;

    /**
    An rng that produces a fixed sequence of values.
    */
    pub(crate) struct SeqRng(pub(crate) Cell<u64>);

    impl Rng for SeqRng {
        fn gen_u64(&self) -> Option<u64> {
            let n = self.0.get();
            self.0.set(n + 1);

            Some(n)
        }
    }

    #[test]
    fn bounds_ignore_rng() {
        assert!(!should_write(0, SeqRng(Cell::new(0))));
        assert!(should_write(100, Empty));
        assert!(should_write(250, Empty));
    }

    #[test]
    fn draw_is_compared_to_factor() {
        // `gen_percent` maps `n` to `n % 100 + 1`
        assert!(should_write(50, SeqRng(Cell::new(49))));
        assert!(!should_write(50, SeqRng(Cell::new(50))));
        assert!(should_write(1, SeqRng(Cell::new(0))));
        assert!(!should_write(99, SeqRng(Cell::new(99))));
    }

    #[test]
    fn missing_rng_writes() {
        assert!(should_write(10, Empty));
    }

    #[test]
    fn factor_is_roughly_respected() {
        let rng = SeqRng(Cell::new(0));

        let written = (0..1_000).filter(|_| should_write(30, &rng)).count();

        assert_eq!(300, written);
    }
}
