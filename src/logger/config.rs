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

use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::ErrorKind;
use crate::append::file::RotationConfig;
use crate::layout::TemplateLayout;
use crate::record::Level;

/// Which sinks receive a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Only the console presenter.
    Console,
    /// Only the rotating log file.
    File,
    /// Both the console presenter and the rotating log file.
    Both,
}

impl StreamMode {
    /// Return `true` if lines go to the console presenter.
    pub fn includes_console(&self) -> bool {
        matches!(self, StreamMode::Console | StreamMode::Both)
    }

    /// Return `true` if lines go to the log file.
    pub fn includes_file(&self) -> bool {
        matches!(self, StreamMode::File | StreamMode::Both)
    }

    /// Return the string representation of the `StreamMode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamMode::Console => "console",
            StreamMode::File => "file",
            StreamMode::Both => "both",
        }
    }
}

impl fmt::Display for StreamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StreamMode {
    type Err = Error;
    fn from_str(s: &str) -> Result<StreamMode, Self::Err> {
        for (name, mode) in [
            ("console", StreamMode::Console),
            ("file", StreamMode::File),
            ("both", StreamMode::Both),
            ("multiple", StreamMode::Both),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(mode);
            }
        }

        Err(Error::new(
            ErrorKind::Config,
            format!("malformed stream mode: {s:?}"),
        ))
    }
}

/// The configuration of one [`Logger`](crate::Logger).
///
/// Every logger owns its own configuration; nothing is shared between loggers.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// The minimum level a record needs to be emitted.
    pub level: Level,
    /// Which sinks receive rendered lines.
    pub stream: StreamMode,
    /// The template and time format lines are rendered with.
    pub layout: TemplateLayout,
    /// The log file and its rotation thresholds.
    pub rotation: RotationConfig,
    /// Exit the process with a non-zero status after emitting a critical record.
    pub exit_on_critical: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            stream: StreamMode::File,
            layout: TemplateLayout::default(),
            rotation: RotationConfig::default(),
            exit_on_critical: false,
        }
    }
}
