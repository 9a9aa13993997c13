/*!
The [`MemorySink`] type.

An in-memory sink that records everything written to it. It's useful for testing code that uses timers.
*/

use std::sync::{Mutex, MutexGuard, PoisonError};

use chronograph_core::{level::Level, sink::Sink, template, value::Value};

/**
A [`Sink`] that records messages in memory.
*/
#[derive(Default)]
pub struct MemorySink {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    written: Vec<Written>,
    props: Vec<(u64, String, Value)>,
    next_id: u64,
}

/**
A message recorded by a [`MemorySink`].
*/
#[derive(Debug, Clone)]
pub struct Written {
    pub lvl: Level,
    /**
    The template the message was written with. For plain messages this is the message itself.
    */
    pub tpl: String,
    pub params: Vec<Value>,
    /**
    The rendered message.
    */
    pub msg: String,
    /**
    The contextual properties active when the message was written, in the order they were pushed.
    */
    pub props: Vec<(String, Value)>,
}

impl Written {
    /**
    Get the most recently pushed contextual property called `name`.
    */
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn props_to_strings(&self) -> Vec<String> {
        self.props
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect()
    }
}

/**
A property pushed onto a [`MemorySink`].
*/
#[derive(Debug)]
pub struct MemoryFrame(u64);

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /**
    Get a copy of the messages written so far.
    */
    pub fn written(&self) -> Vec<Written> {
        self.lock().written.clone()
    }

    /**
    Remove and return the messages written so far.
    */
    pub fn take(&self) -> Vec<Written> {
        std::mem::take(&mut self.lock().written)
    }

    pub fn len(&self) -> usize {
        self.lock().written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().written.is_empty()
    }

    /**
    The contextual properties that are currently pushed.
    */
    pub fn active_props(&self) -> Vec<(String, Value)> {
        self.lock()
            .props
            .iter()
            .map(|(_, k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, lvl: Level, tpl: &str, params: &[Value], msg: String) {
        let mut inner = self.lock();

        let props = inner
            .props
            .iter()
            .map(|(_, k, v)| (k.clone(), v.clone()))
            .collect();

        inner.written.push(Written {
            lvl,
            tpl: tpl.to_owned(),
            params: params.to_vec(),
            msg,
            props,
        });
    }
}

impl Sink for MemorySink {
    type Frame = MemoryFrame;

    fn write(&self, lvl: Level, msg: &str) {
        self.record(lvl, msg, &[], msg.to_owned());
    }

    fn write_tpl(&self, lvl: Level, tpl: &str, params: &[Value]) {
        self.record(lvl, tpl, params, template::render(tpl, params));
    }

    fn push_prop(&self, name: &str, value: &Value) -> Self::Frame {
        let mut inner = self.lock();

        let id = inner.next_id;
        inner.next_id += 1;

        inner.props.push((id, name.to_owned(), value.clone()));

        MemoryFrame(id)
    }

    fn pop_prop(&self, frame: Self::Frame) {
        self.lock().props.retain(|(id, _, _)| *id != frame.0);
    }
}
