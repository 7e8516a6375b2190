// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Log record and level.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;

use crate::Error;
use crate::ErrorKind;

/// The payload of a log message.
///
/// A record lives for a single log call: it is built by the logger once the level gate has been
/// passed and dropped as soon as the rendered line is handed to the sinks.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    now: Timestamp,
    level: Level,
    file: &'a str,
    line: u32,
    payload: Cow<'a, str>,
}

impl<'a> Record<'a> {
    /// Create a new record observed at `now`.
    pub fn new(
        now: Timestamp,
        level: Level,
        file: &'a str,
        line: u32,
        payload: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self {
            now,
            level,
            file,
            line,
            payload: payload.into(),
        }
    }

    /// The observed time.
    pub fn time(&self) -> Timestamp {
        self.now
    }

    /// The verbosity level of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The source file containing the message.
    pub fn file(&self) -> &'a str {
        self.file
    }

    /// The filename of the source file, without its directories.
    pub fn filename(&self) -> Cow<'a, str> {
        std::path::Path::new(self.file)
            .file_name()
            .map(std::ffi::OsStr::to_string_lossy)
            .unwrap_or(Cow::Borrowed(self.file))
    }

    /// The line containing the message.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The message body.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// An enum representing the available severity levels.
///
/// Levels are ordered from the most verbose to the most severe, so `Level::Trace` is the smallest
/// and `Level::Critical` the greatest value.
#[repr(usize)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Level {
    /// Designates very low priority, often extremely verbose, information.
    Trace = 1,
    /// Designates lower priority information.
    Debug,
    /// Designates useful information.
    Info,
    /// Designates hazardous situations.
    Warn,
    /// Designates very serious errors.
    Error,
    /// Designates critical errors, after which the program usually cannot continue.
    Critical,
}

impl Level {
    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Iterate over all levels, from `Trace` to `Critical`.
    pub fn iter() -> impl Iterator<Item = Level> {
        [
            Level::Trace,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Critical,
        ]
        .into_iter()
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;
    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for (name, level) in [
            ("trace", Level::Trace),
            ("debug", Level::Debug),
            ("info", Level::Info),
            ("warn", Level::Warn),
            ("warning", Level::Warn),
            ("error", Level::Error),
            ("critical", Level::Critical),
            ("crit", Level::Critical),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(level);
            }
        }

        Err(Error::new(ErrorKind::Config, format!("malformed level: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_totally_ordered() {
        let levels = Level::iter().collect::<Vec<_>>();
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1], "{} should be below {}", pair[0], pair[1]);
        }
        assert_eq!(levels.first(), Some(&Level::Trace));
        assert_eq!(levels.last(), Some(&Level::Critical));
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Crit".parse::<Level>().unwrap(), Level::Critical);
        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_record_filename_strips_directories() {
        let record = Record::new(Timestamp::UNIX_EPOCH, Level::Info, "src/bin/main.rs", 7, "hi");
        assert_eq!(record.filename(), "main.rs");
        assert_eq!(record.file(), "src/bin/main.rs");

        let record = Record::new(Timestamp::UNIX_EPOCH, Level::Info, "", 0, "hi");
        assert_eq!(record.filename(), "");
    }
}
