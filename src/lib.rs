/*!
Scoped timers for operations.

`chronograph` measures how long an operation takes and writes structured messages about it to a logging backend: one when the operation starts, one when it finishes, and optionally another when it takes longer than expected.

```
use std::{cell::Cell, time::Duration};

use chronograph::{memory::MemorySink, params, Provider, Timer};

let sink = MemorySink::new();
let rows = Cell::new(0);

{
    let _timer = Timer::new(&sink)
        .with_long_running_threshold(Duration::from_secs(5))
        .report("Loaded {Rows} rows", [Provider::from_cell(&rows)])
        .start_with("Loading orders for {Customer}", params!["ACME"]);

    rows.set(3);
}

let written = sink.take();

assert_eq!("Started loading orders for ACME.", written[0].msg);
assert!(written[1].msg.starts_with("Finished loading orders for ACME. Loaded 3 rows. ["));
```

Timers write to any [`Sink`]. The `chronograph_log` and `chronograph_tracing` crates provide sinks for the `log` and `tracing` libraries, and [`memory::MemorySink`] captures messages for tests.
*/

pub mod ctxt;
pub mod frame;
pub mod level;
pub mod memory;
pub mod platform;
pub mod provider;
pub mod sampling;
pub mod stopwatch;
pub mod timer;

#[doc(inline)]
pub use chronograph_core::{clock, empty, rng, sink, template, value, well_known};

#[doc(inline)]
pub use self::{
    clock::Clock,
    empty::Empty,
    level::Level,
    provider::{provide, Provider},
    rng::Rng,
    sink::Sink,
    stopwatch::Stopwatch,
    timer::Timer,
    value::Value,
};

pub use chronograph_core::time::{Constant, General};

/**
Create an unstarted timer that writes to `sink` at the [default level](level::default).
*/
pub fn timer<'a, S: Sink>(sink: S) -> Timer<'a, S> {
    Timer::new(sink).with_event_level(level::default())
}

/**
Create a timer for `description` that writes to `sink` at the [default level](level::default), and start it immediately.
*/
pub fn time<'a, S: Sink>(sink: S, description: &str) -> Timer<'a, S> {
    timer(sink).start_with(description, None)
}

/**
Build a list of message template parameters from a set of expressions.

Each expression is converted into a [`Value`].

```
let params = chronograph::params!["orders", 42, true];

assert_eq!(3, params.len());
```
*/
#[macro_export]
macro_rules! params {
    ($($param:expr),* $(,)?) => {
        ::std::vec![$($crate::Value::from($param)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::memory::MemorySink;

    #[test]
    fn time_starts_immediately() {
        let sink = MemorySink::new();

        let t = time(&sink, "Helper operation");
        assert!(t.is_running());
        t.finish();

        let written = sink.take();

        assert_eq!(2, written.len());
        assert_eq!("Started helper operation.", written[0].msg);
        assert!(written[1].msg.starts_with("Finished helper operation. ["));
    }

    #[test]
    fn timer_is_unstarted() {
        let sink = MemorySink::new();

        let t = timer(&sink).for_action("op");
        assert!(!t.is_running());
        assert!(sink.is_empty());

        t.start().finish();

        assert_eq!(2, sink.len());
    }

    #[test]
    fn default_level_applies_to_new_timers_only() {
        let sink = MemorySink::new();

        let (before, after) = {
            let _guard = crate::level::tests::lock_default();

            let before = timer(&sink).for_action("before");
            level::set_default(Level::Debug);
            let after = timer(&sink).for_action("after");
            level::set_default(Level::Information);

            (before, after)
        };

        assert_eq!(Level::Information, before.event_level());
        assert_eq!(Level::Debug, after.event_level());

        before.start().finish();
        after.start().finish();

        let written = sink.take();

        assert_eq!(
            vec![
                Level::Information,
                Level::Information,
                Level::Debug,
                Level::Debug
            ],
            written.iter().map(|w| w.lvl).collect::<Vec<_>>()
        );
    }

    #[test]
    fn params_converts_values() {
        let empty: Vec<Value> = params![];
        assert!(empty.is_empty());

        let params = params!["a", 1, 2.5, true,];

        assert_eq!(
            vec!["a", "1", "2.5", "true"],
            params.iter().map(|p| p.to_string()).collect::<Vec<_>>()
        );
    }
}
