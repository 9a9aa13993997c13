/*!
Core APIs for `chronograph`.

This crate holds the vocabulary shared between timers and the sinks they write to:
severity levels, owned parameter values, the [`sink::Sink`] trait, clocks, randomness,
and message templates.
*/

pub mod clock;
pub mod empty;
pub mod level;
pub mod rng;
pub mod sink;
pub mod template;
pub mod time;
pub mod value;
pub mod well_known;
