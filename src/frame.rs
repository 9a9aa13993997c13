/*!
The [`Frame`] type.
*/

use chronograph_core::{sink::Sink, value::Value};

/**
A set of properties pushed onto a sink.

The properties are released when the frame is dropped, including while unwinding from a panic, so they never leak into unrelated messages written later.
*/
pub struct Frame<'s, S: Sink> {
    sink: &'s S,
    pushed: Vec<S::Frame>,
}

impl<'s, S: Sink> Frame<'s, S> {
    /**
    Push each property in `props` onto `sink`.
    */
    #[must_use = "the properties are released as soon as the frame is dropped"]
    pub fn push<'p>(sink: &'s S, props: impl IntoIterator<Item = (&'p str, &'p Value)>) -> Self {
        let mut frame = Frame {
            sink,
            pushed: Vec::new(),
        };

        for (name, value) in props {
            // Pushed one at a time so a panicking sink still releases what it already accepted
            let pushed = sink.push_prop(name, value);
            frame.pushed.push(pushed);
        }

        frame
    }

    pub fn len(&self) -> usize {
        self.pushed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pushed.is_empty()
    }
}

impl<'s, S: Sink> Drop for Frame<'s, S> {
    fn drop(&mut self) {
        while let Some(pushed) = self.pushed.pop() {
            self.sink.pop_prop(pushed);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic;

    use chronograph_core::level::Level;

    use super::*;

    use crate::memory::MemorySink;

    #[test]
    fn props_are_visible_until_dropped() {
        let sink = MemorySink::new();

        let a = Value::from(1);
        let b = Value::from("two");

        {
            let frame = Frame::push(&sink, [("a", &a), ("b", &b)]);
            assert_eq!(2, frame.len());

            sink.write(Level::Information, "inside");
        }

        sink.write(Level::Information, "outside");

        let written = sink.take();

        assert_eq!(
            vec!["a=1".to_owned(), "b=two".to_owned()],
            written[0].props_to_strings()
        );
        assert!(written[1].props.is_empty());
    }

    #[test]
    fn props_are_released_on_panic() {
        let sink = MemorySink::new();
        let a = Value::from(1);

        let r = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            let _frame = Frame::push(&sink, [("a", &a)]);

            panic!("failed while the frame was active");
        }));

        assert!(r.is_err());

        sink.write(Level::Information, "after");

        assert!(sink.take()[0].props.is_empty());
    }
}
