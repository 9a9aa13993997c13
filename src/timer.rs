/*!
The [`Timer`] type.

A timer measures the time taken by an operation and writes messages to a [`Sink`] when the operation starts and finishes. Timers are configured through chained builder methods, started with [`Timer::start`], and finished either explicitly with [`Timer::finish`] or implicitly when they go out of scope.

```
# use chronograph::{memory::MemorySink, Timer};
let sink = MemorySink::new();

let timer = Timer::new(&sink)
    .with_parameter("Host", "localhost")
    .start_with("Fetching {Count} rows", chronograph::params![3]);

// do work

timer.finish();

assert_eq!(2, sink.len());
```

Finishing a timer never panics. Panics raised by providers, callbacks, or the sink while the finish messages are written are caught and reported to the sink as errors instead.
*/

use std::{collections::BTreeMap, fmt, panic, time::Duration};

use chronograph_core::{
    clock::Clock,
    level::Level,
    rng::Rng,
    sink::Sink,
    template::{escape_braces, lowercase_first},
    time::{Constant, General},
    value::Value,
    well_known::{KEY_IS_LONG_RUNNING, KEY_OPERATION_DURATION_MS},
};

use crate::{
    frame::Frame,
    platform::{DefaultRng, SystemClock},
    provider::{self, Provider},
    sampling,
    stopwatch::Stopwatch,
};

type OnStart<'a> = Box<dyn FnMut(&[Value]) + 'a>;
type OnEnd<'a, C> = Box<dyn FnMut(&Stopwatch<C>, &[Value]) + 'a>;

/**
A scoped timer for an operation.

Timers are created unstarted with [`Timer::new`], or already started with [`Timer::started`]. A timer that's dropped without being finished is finished automatically; either way its finish messages are written exactly once.

Timers are confined to the thread that created them. Providers and callbacks are boxed without a `Send` bound so they can borrow local state like a `Cell`, which means a timer can't be held across an `.await` in a task that may move between threads.
*/
#[must_use = "the timer is finished as soon as it's dropped"]
pub struct Timer<'a, S: Sink, C: Clock = SystemClock> {
    sink: S,
    stopwatch: Stopwatch<C>,
    lvl: Level,
    description: String,
    description_params: Vec<Value>,
    named_params: BTreeMap<String, Value>,
    end_tpl: Option<String>,
    end_providers: Vec<Provider<'a>>,
    long_running: Option<LongRunning<'a>>,
    on_start: Option<OnStart<'a>>,
    on_end: Option<OnEnd<'a, C>>,
    should_write: bool,
    always_report_long_running: bool,
    started: bool,
    finished: bool,
}

struct LongRunning<'a> {
    threshold: Duration,
    message: Option<String>,
    params: Vec<Value>,
    providers: Vec<Provider<'a>>,
}

impl<'a, S: Sink> Timer<'a, S> {
    /**
    Create an unstarted timer that writes to `sink` at [`Level::Information`].
    */
    pub fn new(sink: S) -> Self {
        Timer::with_clock(sink, SystemClock::new())
    }

    /**
    Create a timer for `description` and start it immediately, writing its start message to `sink`.
    */
    pub fn started(
        sink: S,
        description: &str,
        lvl: Level,
        params: impl IntoIterator<Item = Value>,
    ) -> Self {
        Timer::new(sink)
            .with_event_level(lvl)
            .start_with(description, params)
    }

    /**
    Create a timer for `description` with a finish message template, and start it immediately.

    The `providers` are called when the timer finishes to fill the holes in `end_tpl`.
    */
    pub fn started_with_report(
        sink: S,
        description: &str,
        lvl: Level,
        end_tpl: &str,
        providers: impl IntoIterator<Item = Provider<'a>>,
    ) -> Self {
        Timer::new(sink)
            .with_event_level(lvl)
            .report(end_tpl, providers)
            .start_with(description, None)
    }
}

impl<'a, S: Sink, C: Clock> Timer<'a, S, C> {
    /**
    Create an unstarted timer that measures time using `clock`.
    */
    pub fn with_clock(sink: S, clock: C) -> Self {
        Timer {
            sink,
            stopwatch: Stopwatch::new(clock),
            lvl: Level::Information,
            description: String::new(),
            description_params: Vec::new(),
            named_params: BTreeMap::new(),
            end_tpl: None,
            end_providers: Vec::new(),
            long_running: None,
            on_start: None,
            on_end: None,
            should_write: true,
            always_report_long_running: true,
            started: false,
            finished: false,
        }
    }

    /**
    Set the level the timer's messages are written at.
    */
    pub fn with_event_level(mut self, lvl: Level) -> Self {
        self.lvl = lvl;
        self
    }

    /**
    Add a named parameter that's pushed as a contextual property while the finish messages are written.

    Setting the same name again replaces its value.
    */
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named_params.insert(name.into(), value.into());
        self
    }

    /**
    Add a set of named parameters, replacing the values of any names that are already set.
    */
    pub fn with_parameters<K: Into<String>, V: Into<Value>>(
        mut self,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        for (name, value) in params {
            self.named_params.insert(name.into(), value.into());
        }

        self
    }

    /**
    Describe the operation being timed.

    The description is a message template. Its first character is lower-cased so it reads naturally after `Started` and `Finished`.
    */
    pub fn for_action(self, description: &str) -> Self {
        self.for_action_with(description, None)
    }

    /**
    Describe the operation being timed, with values for the holes in its template.

    Calling this again replaces the description, but appends to the parameters.
    */
    pub fn for_action_with(
        mut self,
        description: &str,
        params: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.description = lowercase_first(description).into_owned();
        self.description_params.extend(params);
        self
    }

    /**
    Add a template to the finish message, along with providers that fill its holes when the timer finishes.

    This replaces any template and providers configured previously.
    */
    pub fn report(
        mut self,
        end_tpl: &str,
        providers: impl IntoIterator<Item = Provider<'a>>,
    ) -> Self {
        self.end_tpl = Some(end_tpl.to_owned());
        self.end_providers = providers.into_iter().collect();
        self
    }

    /**
    Report the operation as long-running if it takes longer than `threshold`.

    Long-running operations get an extra message with a default description of how long they took. Parameters configured by a previous call to [`Timer::with_long_running_report`] or [`Timer::with_long_running_report_from`] are kept; without them the report uses the same parameters as the finish message.
    */
    pub fn with_long_running_threshold(mut self, threshold: Duration) -> Self {
        self.long_running_mut(threshold, "");
        self
    }

    /**
    Report the operation as long-running if it takes longer than `threshold`, using a custom message template and parameters.

    An empty `message` uses the default message.
    */
    pub fn with_long_running_report(
        mut self,
        threshold: Duration,
        message: &str,
        params: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.long_running_mut(threshold, message).params = params.into_iter().collect();
        self
    }

    /**
    Report the operation as long-running if it takes longer than `threshold`, using a custom message template with parameters from `providers`.

    The providers are only called if the operation turns out to be long-running.
    */
    pub fn with_long_running_report_from(
        mut self,
        threshold: Duration,
        message: &str,
        providers: impl IntoIterator<Item = Provider<'a>>,
    ) -> Self {
        self.long_running_mut(threshold, message).providers = providers.into_iter().collect();
        self
    }

    fn long_running_mut(&mut self, threshold: Duration, message: &str) -> &mut LongRunning<'a> {
        let message = if message.is_empty() {
            None
        } else {
            Some(message.to_owned())
        };

        let long_running = self.long_running.get_or_insert_with(|| LongRunning {
            threshold,
            message: None,
            params: Vec::new(),
            providers: Vec::new(),
        });

        long_running.threshold = threshold;
        long_running.message = message;

        long_running
    }

    /**
    Call `on_start` with the description parameters when the timer starts, before the start message is written.
    */
    pub fn with_on_start_action(mut self, on_start: impl FnMut(&[Value]) + 'a) -> Self {
        self.on_start = Some(Box::new(on_start));
        self
    }

    /**
    Call `on_end` with the stopwatch and the finish message parameters when the timer finishes, before the finish message is written.
    */
    pub fn with_on_end_action(
        mut self,
        on_end: impl FnMut(&Stopwatch<C>, &[Value]) + 'a,
    ) -> Self {
        self.on_end = Some(Box::new(on_end));
        self
    }

    /**
    Only write the start and finish messages for roughly `factor` percent of timers.

    The decision is made once, here. Long-running reports are still written for timers that are sampled out if `always_report_long_running` is `true`.
    */
    pub fn with_sampling(self, factor: u32, always_report_long_running: bool) -> Self {
        self.with_sampling_from(DefaultRng::default(), factor, always_report_long_running)
    }

    /**
    Sample the timer's messages, drawing from `rng`.
    */
    pub fn with_sampling_from(
        mut self,
        rng: impl Rng,
        factor: u32,
        always_report_long_running: bool,
    ) -> Self {
        self.should_write = sampling::should_write(factor, rng);
        self.always_report_long_running = always_report_long_running;
        self
    }

    /**
    Start the timer, writing its start message.
    */
    pub fn start(mut self) -> Self {
        self.started = true;

        if let Some(on_start) = self.on_start.as_mut() {
            on_start(&self.description_params);
        }

        if self.should_write {
            if self.description_params.is_empty() {
                self.sink
                    .write(self.lvl, &format!("Started {}.", self.description));
            } else {
                self.sink.write_tpl(
                    self.lvl,
                    &format!("Started {}.", escape_braces(&self.description)),
                    &self.description_params,
                );
            }
        }

        self.stopwatch.start();

        self
    }

    /**
    Describe the operation and start the timer.
    */
    pub fn start_with(self, description: &str, params: impl IntoIterator<Item = Value>) -> Self {
        self.for_action_with(description, params).start()
    }

    /**
    Stop measuring time until [`Timer::resume`] is called.
    */
    pub fn pause(&mut self) {
        self.stopwatch.stop();
    }

    /**
    Continue measuring time after [`Timer::pause`].
    */
    pub fn resume(&mut self) {
        self.stopwatch.start();
    }

    /**
    Finish the timer, writing its finish message.
    */
    pub fn finish(mut self) {
        self.finalize();
    }

    /**
    Finish the timer with a finish message template and providers, replacing any configured with [`Timer::report`].
    */
    pub fn finish_with(mut self, end_tpl: &str, providers: impl IntoIterator<Item = Provider<'a>>) {
        let providers: Vec<_> = providers.into_iter().collect();

        if self.should_write {
            if let Some(ref previous) = self.end_tpl {
                self.sink.write(
                    Level::Warning,
                    &format!(
                        "Looks like the end message template for operation '{}' was previously configured to '{}', it will be overridden by specified '{}' message",
                        self.description, previous, end_tpl
                    ),
                );
            }

            if !self.end_providers.is_empty() {
                self.sink.write(
                    Level::Warning,
                    &format!(
                        "Looks like the {} parameter provider functions for end message template were previously configured, they will be overridden by specified {} functions",
                        self.end_providers.len(),
                        providers.len()
                    ),
                );
            }
        }

        self.end_tpl = Some(end_tpl.to_owned());
        self.end_providers = providers;

        self.finalize();
    }

    /**
    The total time the timer has spent running.
    */
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    /**
    Whether the timer is currently measuring time.
    */
    pub fn is_running(&self) -> bool {
        self.stopwatch.is_running()
    }

    /**
    The duration after which the operation is considered long-running, if long-running reports are enabled.
    */
    pub fn long_running_threshold(&self) -> Option<Duration> {
        self.long_running.as_ref().map(|long_running| long_running.threshold)
    }

    /**
    The level the timer's start, finish and long-running messages are written at.
    */
    pub fn event_level(&self) -> Level {
        self.lvl
    }

    /**
    The normalized description of the operation.
    */
    pub fn description(&self) -> &str {
        &self.description
    }

    fn finalize(&mut self) {
        if self.finished {
            return;
        }

        self.finished = true;

        if let Err(panic) = panic::catch_unwind(panic::AssertUnwindSafe(|| self.write_finish())) {
            let details = Value::from(provider::panic_message(&*panic));

            // Nothing is left to report a panicking sink to
            let _ = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                self.sink.write_tpl(
                    Level::Error,
                    "An error happened while finishing the timer. Details: {Details}",
                    &[details],
                )
            }));
        }
    }

    fn write_finish(&mut self) {
        self.stopwatch.stop();

        if !self.started {
            self.sink.write(
                Level::Warning,
                &format!(
                    "Looks like timer for operation '{}' was not properly started. Reported results may be incorrect",
                    self.description
                ),
            );
        }

        let elapsed = self.stopwatch.elapsed();
        let description = escape_braces(&self.description).into_owned();

        self.named_params.insert(
            KEY_OPERATION_DURATION_MS.to_owned(),
            Value::from(elapsed.as_nanos() as f64 / 1_000_000.0),
        );

        let is_long_running = self
            .long_running
            .as_ref()
            .map_or(false, |long_running| elapsed > long_running.threshold);

        if is_long_running {
            self.named_params
                .insert(KEY_IS_LONG_RUNNING.to_owned(), Value::from(true));
        }

        let _frame = Frame::push(
            &self.sink,
            self.named_params
                .iter()
                .map(|(name, value)| (name.as_str(), value)),
        );

        let mut params = self.description_params.clone();
        params.extend(provider::invoke_all(
            &self.sink,
            &self.description,
            &mut self.end_providers,
        ));
        params.push(Value::from(General(elapsed).to_string()));

        if let Some(on_end) = self.on_end.as_mut() {
            on_end(&self.stopwatch, &params);
        }

        if self.should_write {
            let tpl = match self.end_tpl.as_deref() {
                Some(end_tpl) if !end_tpl.trim().is_empty() => format!(
                    "Finished {}. {}. [{{operationDuration}}]",
                    description,
                    escape_braces(end_tpl)
                ),
                _ => format!("Finished {}. [{{operationDuration}}]", description),
            };

            self.sink.write_tpl(self.lvl, &tpl, &params);
        }

        if is_long_running && (self.always_report_long_running || self.should_write) {
            if let Some(long_running) = self.long_running.as_mut() {
                let tpl = match long_running.message {
                    Some(ref message) => message.clone(),
                    None => format!(
                        "{} took a long time to finish >({}) : [{}]",
                        description,
                        Constant(long_running.threshold),
                        General(elapsed)
                    ),
                };

                let long_running_params = if !long_running.params.is_empty() {
                    long_running.params.clone()
                } else if !long_running.providers.is_empty() {
                    provider::invoke_all(&self.sink, &self.description, &mut long_running.providers)
                } else {
                    params
                };

                self.sink.write_tpl(self.lvl, &tpl, &long_running_params);
            }
        }
    }
}

impl<'a, S: Sink, C: Clock> Drop for Timer<'a, S, C> {
    fn drop(&mut self) {
        self.finalize();
    }
}

impl<'a, S: Sink, C: Clock> fmt::Debug for Timer<'a, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("description", &self.description)
            .field("lvl", &self.lvl)
            .field("elapsed", &self.stopwatch.elapsed())
            .field("running", &self.stopwatch.is_running())
            .finish()
    }
}
