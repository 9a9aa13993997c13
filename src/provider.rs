/*!
Lazily evaluated parameters.

A [`Provider`] is a closure that produces a parameter value when a timer finishes, rather than when it's configured. This lets finish messages report results that are only known once the timed operation has run, like the number of items it processed.
*/

use std::{any::Any, cell::Cell, panic};

use chronograph_core::{level::Level, sink::Sink, value::Value};

/**
The value substituted for a provider that panicked.
*/
pub const PROVIDER_FAILED: i64 = i64::MIN;

/**
A closure producing a parameter value when a timer finishes.

Providers returning `None` contribute nothing to the parameters of a message.
*/
pub struct Provider<'a>(Box<dyn FnMut() -> Option<Value> + 'a>);

impl<'a> Provider<'a> {
    /**
    Create a provider from a closure that always produces a value.
    */
    pub fn new<T: Into<Value>>(mut f: impl FnMut() -> T + 'a) -> Self {
        Provider(Box::new(move || Some(f().into())))
    }

    /**
    Create a provider from a closure that may not produce a value.
    */
    pub fn new_optional<T: Into<Value>>(mut f: impl FnMut() -> Option<T> + 'a) -> Self {
        Provider(Box::new(move || f().map(Into::into)))
    }

    /**
    Create a provider that reads the current value of a cell.
    */
    pub fn from_cell<T: Copy + Into<Value>>(cell: &'a Cell<T>) -> Self {
        Provider::new(move || cell.get())
    }

    pub(crate) fn call(&mut self) -> Option<Value> {
        (self.0)()
    }
}

/**
Create a [`Provider`] from a closure.
*/
pub fn provide<'a, T: Into<Value>>(f: impl FnMut() -> T + 'a) -> Provider<'a> {
    Provider::new(f)
}

/**
Call each provider in turn, collecting the values they produce.

A provider that panics is reported to `sink` as an error and replaced by [`PROVIDER_FAILED`]; the remaining providers are still called.
*/
pub(crate) fn invoke_all(
    sink: &impl Sink,
    description: &str,
    providers: &mut [Provider],
) -> Vec<Value> {
    let mut values = Vec::with_capacity(providers.len());

    for provider in providers {
        if let Some(value) = invoke(sink, description, provider) {
            values.push(value);
        }
    }

    values
}

fn invoke(sink: &impl Sink, description: &str, provider: &mut Provider) -> Option<Value> {
    match panic::catch_unwind(panic::AssertUnwindSafe(|| provider.call())) {
        Ok(value) => value,
        Err(panic) => {
            sink.write(
                Level::Error,
                &format!(
                    "Error happened during the '{}' count provider invocation.\nPanic: {}",
                    description,
                    panic_message(&*panic)
                ),
            );

            Some(Value::from(PROVIDER_FAILED))
        }
    }
}

/**
Get a human-readable message from a panic payload.
*/
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "the panic payload is not a string"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::memory::MemorySink;

    #[test]
    fn providers_are_invoked_lazily() {
        let count = Cell::new(0);

        let mut providers = vec![Provider::from_cell(&count), provide(|| "fixed")];

        count.set(42);

        let values = invoke_all(&MemorySink::new(), "op", &mut providers);

        assert_eq!(2, values.len());
        assert_eq!(Some(42), values[0].to_i64());
        assert_eq!("fixed", values[1].to_string());
    }

    #[test]
    fn none_values_are_skipped() {
        let mut providers = vec![
            Provider::new_optional(|| None::<i32>),
            Provider::new_optional(|| Some(1)),
        ];

        let values = invoke_all(&MemorySink::new(), "op", &mut providers);

        assert_eq!(1, values.len());
        assert_eq!(Some(1), values[0].to_i64());
    }

    #[test]
    fn panicking_provider_is_replaced_with_sentinel() {
        let sink = MemorySink::new();

        let mut providers = vec![
            provide(|| -> i32 { panic!("provider exploded") }),
            provide(|| 7),
        ];

        let values = invoke_all(&sink, "test operation", &mut providers);

        assert_eq!(2, values.len());
        assert_eq!(Some(PROVIDER_FAILED), values[0].to_i64());
        assert_eq!(Some(7), values[1].to_i64());

        let written = sink.take();
        assert_eq!(1, written.len());
        assert_eq!(Level::Error, written[0].lvl);
        assert!(written[0].msg.contains("'test operation' count provider"));
        assert!(written[0].msg.contains("provider exploded"));
    }

    #[test]
    fn panic_message_formats() {
        let static_str: Box<dyn Any + Send> = Box::new("static");
        let string: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let other: Box<dyn Any + Send> = Box::new(42);

        assert_eq!("static", panic_message(&*static_str));
        assert_eq!("owned", panic_message(&*string));
        assert_eq!("the panic payload is not a string", panic_message(&*other));
    }
}
