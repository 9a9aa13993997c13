/*!
The [`Sink`] type.

A sink is the logging backend a timer writes its events to. It's responsible for rendering message templates, attaching contextual properties to the messages it writes, and persisting them somewhere.
*/

use crate::{empty::Empty, level::Level, value::Value};

/**
A logging backend that timers write messages to.
*/
pub trait Sink {
    /**
    A handle to a property pushed with [`Sink::push_prop`].
    */
    type Frame;

    /**
    Write a plain message.

    The message is not a template; braces in it are written as-is.
    */
    fn write(&self, lvl: Level, msg: &str);

    /**
    Write a message template along with positional values for its holes.

    The template uses `{Name}` holes and `{{`/`}}` for literal braces. Associating holes with `params` is up to the sink; [`crate::template::Template`] can be used to render them positionally.
    */
    fn write_tpl(&self, lvl: Level, tpl: &str, params: &[Value]);

    /**
    Push a contextual property that will be attached to subsequent writes until the returned frame is passed to [`Sink::pop_prop`].
    */
    fn push_prop(&self, name: &str, value: &Value) -> Self::Frame;

    /**
    Release a property pushed by [`Sink::push_prop`].

    Frames may be released in any order.
    */
    fn pop_prop(&self, frame: Self::Frame);
}

impl<'a, T: Sink + ?Sized> Sink for &'a T {
    type Frame = T::Frame;

    fn write(&self, lvl: Level, msg: &str) {
        (**self).write(lvl, msg)
    }

    fn write_tpl(&self, lvl: Level, tpl: &str, params: &[Value]) {
        (**self).write_tpl(lvl, tpl, params)
    }

    fn push_prop(&self, name: &str, value: &Value) -> Self::Frame {
        (**self).push_prop(name, value)
    }

    fn pop_prop(&self, frame: Self::Frame) {
        (**self).pop_prop(frame)
    }
}

impl<T: Sink + ?Sized> Sink for Box<T> {
    type Frame = T::Frame;

    fn write(&self, lvl: Level, msg: &str) {
        (**self).write(lvl, msg)
    }

    fn write_tpl(&self, lvl: Level, tpl: &str, params: &[Value]) {
        (**self).write_tpl(lvl, tpl, params)
    }

    fn push_prop(&self, name: &str, value: &Value) -> Self::Frame {
        (**self).push_prop(name, value)
    }

    fn pop_prop(&self, frame: Self::Frame) {
        (**self).pop_prop(frame)
    }
}

impl<T: Sink + ?Sized> Sink for std::sync::Arc<T> {
    type Frame = T::Frame;

    fn write(&self, lvl: Level, msg: &str) {
        (**self).write(lvl, msg)
    }

    fn write_tpl(&self, lvl: Level, tpl: &str, params: &[Value]) {
        (**self).write_tpl(lvl, tpl, params)
    }

    fn push_prop(&self, name: &str, value: &Value) -> Self::Frame {
        (**self).push_prop(name, value)
    }

    fn pop_prop(&self, frame: Self::Frame) {
        (**self).pop_prop(frame)
    }
}

impl<T: Sink> Sink for Option<T> {
    type Frame = Option<T::Frame>;

    fn write(&self, lvl: Level, msg: &str) {
        match self {
            Some(sink) => sink.write(lvl, msg),
            None => Empty.write(lvl, msg),
        }
    }

    fn write_tpl(&self, lvl: Level, tpl: &str, params: &[Value]) {
        match self {
            Some(sink) => sink.write_tpl(lvl, tpl, params),
            None => Empty.write_tpl(lvl, tpl, params),
        }
    }

    fn push_prop(&self, name: &str, value: &Value) -> Self::Frame {
        self.as_ref().map(|sink| sink.push_prop(name, value))
    }

    fn pop_prop(&self, frame: Self::Frame) {
        if let (Some(sink), Some(frame)) = (self, frame) {
            sink.pop_prop(frame)
        }
    }
}

impl Sink for Empty {
    type Frame = Empty;

    fn write(&self, _: Level, _: &str) {}

    fn write_tpl(&self, _: Level, _: &str, _: &[Value]) {}

    fn push_prop(&self, _: &str, _: &Value) -> Self::Frame {
        Empty
    }

    fn pop_prop(&self, _: Self::Frame) {}
}

/**
A [`Sink`] from a function.

Plain messages are passed to the function with an empty set of parameters. Contextual properties are discarded.
*/
pub struct FromFn<F>(F);

impl<F: Fn(Level, &str, &[Value])> Sink for FromFn<F> {
    type Frame = Empty;

    fn write(&self, lvl: Level, msg: &str) {
        (self.0)(lvl, msg, &[])
    }

    fn write_tpl(&self, lvl: Level, tpl: &str, params: &[Value]) {
        (self.0)(lvl, tpl, params)
    }

    fn push_prop(&self, _: &str, _: &Value) -> Self::Frame {
        Empty
    }

    fn pop_prop(&self, _: Self::Frame) {}
}

/**
Create a [`Sink`] from a function.
*/
pub fn from_fn<F: Fn(Level, &str, &[Value])>(f: F) -> FromFn<F> {
    FromFn(f)
}
