/*!
The [`Level`] type.
*/

use core::{fmt, str::FromStr};

pub const LVL_VERBOSE: &str = "VERBOSE";
pub const LVL_DEBUG: &str = "DEBUG";
pub const LVL_INFO: &str = "INFO";
pub const LVL_WARN: &str = "WARN";
pub const LVL_ERROR: &str = "ERROR";
pub const LVL_FATAL: &str = "FATAL";
pub const LVL_NONE: &str = "NONE";

/**
The severity a message is written at.

Levels are ordered from least to most severe. [`Level::None`] sorts last and means the message should never be written; only sinks that can disable a level entirely give it any meaning.
*/
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Verbose,
    Debug,
    Information,
    Warning,
    Error,
    Fatal,
    None,
}

impl Level {
    /**
    Whether messages at this level should be written at all.
    */
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Level::None)
    }

    /**
    A compact representation of the level, suitable for storing in an atomic.
    */
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /**
    Convert a value produced by [`Level::to_u8`] back into a level.
    */
    pub const fn from_u8(lvl: u8) -> Option<Level> {
        match lvl {
            0 => Some(Level::Verbose),
            1 => Some(Level::Debug),
            2 => Some(Level::Information),
            3 => Some(Level::Warning),
            4 => Some(Level::Error),
            5 => Some(Level::Fatal),
            6 => Some(Level::None),
            _ => None,
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Verbose => LVL_VERBOSE,
            Level::Debug => LVL_DEBUG,
            Level::Information => LVL_INFO,
            Level::Warning => LVL_WARN,
            Level::Error => LVL_ERROR,
            Level::Fatal => LVL_FATAL,
            Level::None => LVL_NONE,
        })
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lvl = s.as_bytes();

        match lvl.first() {
            Some(b'V') | Some(b'v') => {
                parse(lvl, b"VERBOSE", Level::Verbose).or_else(|_| parse(lvl, b"VRB", Level::Verbose))
            }
            Some(b'T') | Some(b't') => parse(lvl, b"TRACE", Level::Verbose),
            Some(b'D') | Some(b'd') => {
                parse(lvl, b"DEBUG", Level::Debug).or_else(|_| parse(lvl, b"DBG", Level::Debug))
            }
            Some(b'I') | Some(b'i') => parse(lvl, b"INFORMATION", Level::Information),
            Some(b'W') | Some(b'w') => {
                parse(lvl, b"WARNING", Level::Warning).or_else(|_| parse(lvl, b"WRN", Level::Warning))
            }
            Some(b'E') | Some(b'e') => {
                parse(lvl, b"ERROR", Level::Error).or_else(|_| parse(lvl, b"ERR", Level::Error))
            }
            Some(b'F') | Some(b'f') => {
                parse(lvl, b"FATAL", Level::Fatal).or_else(|_| parse(lvl, b"FTL", Level::Fatal))
            }
            Some(b'C') | Some(b'c') => parse(lvl, b"CRITICAL", Level::Fatal),
            Some(b'N') | Some(b'n') => parse(lvl, b"NONE", Level::None),
            Some(_) => Err(ParseLevelError {}),
            None => Err(ParseLevelError {}),
        }
    }
}

fn parse(
    mut input: &[u8],
    mut expected_uppercase: &[u8],
    ok: Level,
) -> Result<Level, ParseLevelError> {
    // Assume the first character has already been matched
    input = &input[1..];
    expected_uppercase = &expected_uppercase[1..];

    // Doesn't require a full match of the expected content
    // For example, `INF` will match `INFORMATION`
    while let Some(b) = input.first() {
        let Some(e) = expected_uppercase.first() else {
            return Err(ParseLevelError {});
        };

        if b.to_ascii_uppercase() != *e {
            return Err(ParseLevelError {});
        }

        expected_uppercase = &expected_uppercase[1..];
        input = &input[1..];
    }

    Ok(ok)
}

/**
An error attempting to parse a [`Level`] from text.
*/
#[derive(Debug)]
pub struct ParseLevelError {}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the input was not a valid level")
    }
}

impl std::error::Error for ParseLevelError {}

impl Default for Level {
    fn default() -> Self {
        Level::Information
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_roundtrip() {
        for lvl in [
            Level::Verbose,
            Level::Debug,
            Level::Information,
            Level::Warning,
            Level::Error,
            Level::Fatal,
            Level::None,
        ] {
            let fmt = lvl.to_string();

            let parsed: Level = fmt.parse().unwrap();

            assert_eq!(lvl, parsed, "{}", fmt);
        }
    }

    #[test]
    fn level_parse_abbreviated() {
        for (case, expected) in [
            ("inf", Level::Information),
            ("Information", Level::Information),
            ("WRN", Level::Warning),
            ("warning", Level::Warning),
            ("dbg", Level::Debug),
            ("trace", Level::Verbose),
            ("vrb", Level::Verbose),
            ("critical", Level::Fatal),
            ("FTL", Level::Fatal),
            ("err", Level::Error),
        ] {
            assert_eq!(expected, case.parse::<Level>().unwrap(), "{}", case);
        }
    }

    #[test]
    fn level_parse_invalid() {
        for case in ["", "x", "informationally", "warnings", "nothing"] {
            assert!(case.parse::<Level>().is_err(), "{}", case);
        }
    }

    #[test]
    fn level_u8_roundtrip() {
        for lvl in [Level::Verbose, Level::Information, Level::Fatal, Level::None] {
            assert_eq!(Some(lvl), Level::from_u8(lvl.to_u8()));
        }

        assert_eq!(None, Level::from_u8(7));
    }

    #[test]
    fn level_default_is_information() {
        assert_eq!(Level::Information, Level::default());
        assert!(Level::default().is_enabled());
        assert!(!Level::None.is_enabled());
    }
}
