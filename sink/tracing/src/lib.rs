/*!
Write timer messages to `tracing`.

# Getting started

Add `chronograph` and `chronograph_tracing` to your `Cargo.toml`:

```toml
[dependencies.chronograph]
version = "0.3.0"

[dependencies.chronograph_tracing]
version = "0.3.0"
```

Then time operations against [`sink()`]:

```
let timer = chronograph::time(chronograph_tracing::sink(), "Rebuilding the index");

// Your operation goes here

timer.finish();
```

Messages are written as `tracing` events with the `chronograph` target, dispatched to the current subscriber. The rendered message is the event's `message`, the raw template is the `template` field, and properties pushed by a timer are formatted into the `properties` field.

Levels map to their nearest `tracing` equivalent. `Verbose` is written at `TRACE`, `Fatal` at `ERROR`, and `None` isn't written at all.
*/

#![deny(missing_docs)]

use std::fmt;

use chronograph::{
    ctxt::{ThreadLocalCtxt, ThreadLocalFrame},
    template::Template,
    Level, Sink, Value,
};

/**
Get a sink that writes to the current `tracing` subscriber.
*/
pub fn sink() -> TracingSink {
    TracingSink::new()
}

/**
A [`Sink`] that writes `tracing` events.

Properties pushed onto this sink are stored in thread-local context, so they're only attached to events written on the same thread.
*/
#[derive(Default, Debug, Clone)]
pub struct TracingSink {
    ctxt: ThreadLocalCtxt,
}

impl TracingSink {
    /**
    Create a new sink.
    */
    pub const fn new() -> Self {
        TracingSink {
            ctxt: ThreadLocalCtxt::new(),
        }
    }

    fn event(&self, lvl: Level, tpl: Option<&str>, msg: impl fmt::Display) {
        let mut props = Vec::new();
        self.ctxt
            .for_each(|name, value| props.push((name.to_owned(), value.clone())));

        let props = Properties(&props);

        // `tracing` needs a constant level at each callsite
        macro_rules! event_at {
            ($lvl:expr) => {
                tracing::event!(
                    target: "chronograph",
                    $lvl,
                    template = tpl,
                    properties = %props,
                    "{}",
                    msg
                )
            };
        }

        match lvl {
            Level::Verbose => event_at!(tracing::Level::TRACE),
            Level::Debug => event_at!(tracing::Level::DEBUG),
            Level::Information => event_at!(tracing::Level::INFO),
            Level::Warning => event_at!(tracing::Level::WARN),
            Level::Error | Level::Fatal => event_at!(tracing::Level::ERROR),
            Level::None => (),
        }
    }
}

impl Sink for TracingSink {
    type Frame = ThreadLocalFrame;

    fn write(&self, lvl: Level, msg: &str) {
        self.event(lvl, None, msg);
    }

    fn write_tpl(&self, lvl: Level, tpl: &str, params: &[Value]) {
        self.event(lvl, Some(tpl), Template::parse(tpl).render(params));
    }

    fn push_prop(&self, name: &str, value: &Value) -> Self::Frame {
        self.ctxt.push(name, value)
    }

    fn pop_prop(&self, frame: Self::Frame) {
        self.ctxt.pop(frame)
    }
}

struct Properties<'a>(&'a [(String, Value)]);

impl<'a> fmt::Display for Properties<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (name, value) in self.0 {
            if !first {
                f.write_str(" ")?;
            }
            first = false;

            write!(f, "{}={}", name, value)?;
        }

        Ok(())
    }
}
