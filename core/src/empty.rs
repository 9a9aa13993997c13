/*!
The [`Empty`] type.

An [`Empty`] can be used as a default in place of a more meaningful implementation of most traits. For example, for [`crate::sink::Sink`]s, it discards written messages, for [`crate::clock::Clock`]s, it never reads a time, and for [`crate::rng::Rng`]s, it never produces randomness.
*/

/**
A type that behaves like a default, empty, null value.
*/
#[derive(Default, Debug, Clone, Copy)]
pub struct Empty;
