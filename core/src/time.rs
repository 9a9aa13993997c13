/*!
Duration formatting.

Timers write elapsed times in two textual forms:

- [`General`]: `[d:]h:mm:ss[.FFFFFFF]`, where the fraction is trimmed of trailing zeros. This is the form appended to finish messages.
- [`Constant`]: `[d.]hh:mm:ss[.fffffff]`, where the fraction always has seven digits. This is the form used for thresholds in long-running reports.

Both forms have a resolution of 100 nanoseconds.
*/

use core::fmt;
use std::time::Duration;

const NANOS_PER_TICK: u32 = 100;

struct Parts {
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
    ticks: u32,
}

impl Parts {
    fn new(duration: Duration) -> Self {
        let secs = duration.as_secs();

        Parts {
            days: secs / 86_400,
            hours: (secs / 3_600) % 24,
            minutes: (secs / 60) % 60,
            seconds: secs % 60,
            ticks: duration.subsec_nanos() / NANOS_PER_TICK,
        }
    }
}

/**
Format a duration like `0:00:01.5`.
*/
#[derive(Debug, Clone, Copy)]
pub struct General(pub Duration);

impl fmt::Display for General {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = Parts::new(self.0);

        if parts.days > 0 {
            write!(f, "{}:", parts.days)?;
        }

        write!(
            f,
            "{}:{:02}:{:02}",
            parts.hours, parts.minutes, parts.seconds
        )?;

        if parts.ticks > 0 {
            let mut ticks = parts.ticks;
            let mut width = 7;

            while ticks % 10 == 0 {
                ticks /= 10;
                width -= 1;
            }

            write!(f, ".{:0width$}", ticks, width = width)?;
        }

        Ok(())
    }
}

/**
Format a duration like `00:00:01.5000000`.
*/
#[derive(Debug, Clone, Copy)]
pub struct Constant(pub Duration);

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = Parts::new(self.0);

        if parts.days > 0 {
            write!(f, "{}.", parts.days)?;
        }

        write!(
            f,
            "{:02}:{:02}:{:02}",
            parts.hours, parts.minutes, parts.seconds
        )?;

        if parts.ticks > 0 {
            write!(f, ".{:07}", parts.ticks)?;
        }

        Ok(())
    }
}
