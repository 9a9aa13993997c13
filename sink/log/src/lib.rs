/*!
Write timer messages to the `log` crate.

# Getting started

Add `chronograph` and `chronograph_log` to your `Cargo.toml`:

```toml
[dependencies.chronograph]
version = "0.3.0"

[dependencies.chronograph_log]
version = "0.3.0"
```

Then time operations against [`sink()`]:

```
let timer = chronograph::time(chronograph_log::sink(), "Loading configuration");

// Your operation goes here

timer.finish();
```

Messages are written through whatever logger is installed with [`log::set_logger`]. The rendered message becomes the record's arguments. The raw template and any properties pushed by a timer are attached as structured key-values.

Levels are mapped like this:

| chronograph | log |
| ----------- | --- |
| `Verbose` | `Trace` |
| `Debug` | `Debug` |
| `Information` | `Info` |
| `Warning` | `Warn` |
| `Error` | `Error` |
| `Fatal` | `Error` |
| `None` | not written |
*/

#![deny(missing_docs)]

use std::fmt;

use chronograph::{
    ctxt::{ThreadLocalCtxt, ThreadLocalFrame},
    template::Template,
    well_known::KEY_TEMPLATE,
    Level, Sink, Value,
};

/**
Get a sink that writes to the global logger.
*/
pub fn sink() -> LogSink {
    LogSink::new()
}

/**
A [`Sink`] that writes to the global logger from the `log` crate.

Properties pushed onto this sink are stored in thread-local context, so they're only attached to messages written on the same thread.
*/
#[derive(Debug, Clone)]
pub struct LogSink {
    target: &'static str,
    ctxt: ThreadLocalCtxt,
}

impl Default for LogSink {
    fn default() -> Self {
        LogSink::new()
    }
}

impl LogSink {
    /**
    Create a sink that writes records with the `chronograph` target.
    */
    pub const fn new() -> Self {
        LogSink {
            target: "chronograph",
            ctxt: ThreadLocalCtxt::new(),
        }
    }

    /**
    Use a different target for the records this sink writes.
    */
    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    fn log(&self, lvl: Level, tpl: Option<&str>, msg: impl fmt::Display) {
        let Some(lvl) = to_log_level(lvl) else {
            return;
        };

        let logger = log::logger();
        let metadata = log::Metadata::builder()
            .level(lvl)
            .target(self.target)
            .build();

        if lvl > log::max_level() || !logger.enabled(&metadata) {
            return;
        }

        let mut props = Vec::new();
        self.ctxt
            .for_each(|name, value| props.push((name.to_owned(), value.clone())));

        let kvs = Kvs { tpl, props: &props };

        logger.log(
            &log::Record::builder()
                .metadata(metadata)
                .args(format_args!("{}", msg))
                .key_values(&kvs)
                .build(),
        );
    }
}

impl Sink for LogSink {
    type Frame = ThreadLocalFrame;

    fn write(&self, lvl: Level, msg: &str) {
        self.log(lvl, None, msg);
    }

    fn write_tpl(&self, lvl: Level, tpl: &str, params: &[Value]) {
        self.log(lvl, Some(tpl), Template::parse(tpl).render(params));
    }

    fn push_prop(&self, name: &str, value: &Value) -> Self::Frame {
        self.ctxt.push(name, value)
    }

    fn pop_prop(&self, frame: Self::Frame) {
        self.ctxt.pop(frame)
    }
}

fn to_log_level(lvl: Level) -> Option<log::Level> {
    match lvl {
        Level::Verbose => Some(log::Level::Trace),
        Level::Debug => Some(log::Level::Debug),
        Level::Information => Some(log::Level::Info),
        Level::Warning => Some(log::Level::Warn),
        Level::Error | Level::Fatal => Some(log::Level::Error),
        Level::None => None,
    }
}

struct Kvs<'a> {
    tpl: Option<&'a str>,
    props: &'a [(String, Value)],
}

impl<'a> log::kv::Source for Kvs<'a> {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn log::kv::VisitSource<'kvs>,
    ) -> Result<(), log::kv::Error> {
        if let Some(tpl) = self.tpl {
            visitor.visit_pair(
                log::kv::Key::from_str(KEY_TEMPLATE),
                log::kv::Value::from(tpl),
            )?;
        }

        for (name, value) in self.props {
            visitor.visit_pair(
                log::kv::Key::from_str(name),
                log::kv::Value::from_display(value),
            )?;
        }

        Ok(())
    }
}
