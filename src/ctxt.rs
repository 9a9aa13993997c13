/*!
A thread-local ambient property stack.

Sinks for backends without their own scoped context, like the `log` facade, can use [`ThreadLocalCtxt`] to implement [`chronograph_core::sink::Sink::push_prop`] and attach the active properties to the messages they write.
*/

use std::cell::RefCell;

use chronograph_core::value::Value;

thread_local! {
    static ACTIVE: RefCell<ThreadLocalProps> = RefCell::new(ThreadLocalProps {
        props: Vec::new(),
        next_id: 0,
    });
}

struct ThreadLocalProps {
    props: Vec<(u64, String, Value)>,
    next_id: u64,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct ThreadLocalCtxt;

/**
A property pushed onto the current thread's context.

Frames must be released on the thread that pushed them.
*/
#[derive(Debug)]
pub struct ThreadLocalFrame(u64);

impl ThreadLocalCtxt {
    pub const fn new() -> Self {
        ThreadLocalCtxt
    }

    pub fn push(&self, name: &str, value: &Value) -> ThreadLocalFrame {
        ACTIVE.with(|active| {
            let mut active = active.borrow_mut();

            let id = active.next_id;
            active.next_id += 1;

            active.props.push((id, name.to_owned(), value.clone()));

            ThreadLocalFrame(id)
        })
    }

    pub fn pop(&self, frame: ThreadLocalFrame) {
        ACTIVE.with(|active| {
            active
                .borrow_mut()
                .props
                .retain(|(id, _, _)| *id != frame.0)
        })
    }

    /**
    Call `with` for each active property, in the order they were pushed.
    */
    pub fn for_each(&self, mut with: impl FnMut(&str, &Value)) {
        // Clone so `with` can itself write to a sink using this context
        let props = ACTIVE.with(|active| active.borrow().props.clone());

        for (_, name, value) in &props {
            with(name, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        ACTIVE.with(|active| active.borrow().props.is_empty())
    }
}
