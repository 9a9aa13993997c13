/*!
The [`Stopwatch`] type.
*/

use std::time::{Duration, Instant};

use chronograph_core::clock::Clock;

/**
A pausable measurement of elapsed time.

Elapsed time only accumulates while the stopwatch is running. Starting a running stopwatch or stopping a stopped one has no effect.
*/
pub struct Stopwatch<C> {
    clock: C,
    elapsed: Duration,
    running: Option<Running>,
}

#[derive(Clone, Copy)]
struct Running {
    since: Option<Instant>,
}

impl<C: Clock> Stopwatch<C> {
    /**
    Create a stopwatch that isn't running yet.
    */
    pub fn new(clock: C) -> Self {
        Stopwatch {
            clock,
            elapsed: Duration::ZERO,
            running: None,
        }
    }

    /**
    Create a stopwatch and start it immediately.
    */
    pub fn start_new(clock: C) -> Self {
        let mut stopwatch = Stopwatch::new(clock);
        stopwatch.start();

        stopwatch
    }

    pub fn start(&mut self) {
        if self.running.is_none() {
            self.running = Some(Running {
                since: self.clock.now(),
            });
        }
    }

    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            self.elapsed += self.interval(running);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /**
    The total time this stopwatch has spent running, including the current interval if it's running now.
    */
    pub fn elapsed(&self) -> Duration {
        match self.running {
            Some(running) => self.elapsed + self.interval(running),
            None => self.elapsed,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn interval(&self, running: Running) -> Duration {
        match (running.since, self.clock.now()) {
            (Some(since), Some(now)) => now.saturating_duration_since(since),
            _ => Duration::ZERO,
        }
    }
}
