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

//! Sinks that rendered log lines are delivered to.

use std::fmt;

use crate::record::Level;

pub mod file;
mod console;

pub use self::console::Console;
pub use self::console::ToneColor;
pub use self::file::FileSink;

/// The tone a console line is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// No particular tone.
    Neutral,
    /// Informational output.
    Info,
    /// Something may be wrong.
    Warn,
    /// Something is wrong.
    Error,
}

/// How a rendered line should be presented on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// The tone of the line.
    pub tone: Tone,
    /// Whether the line should stand out beyond its tone.
    pub emphasis: bool,
}

impl Style {
    /// Return the fixed style of `level`.
    pub const fn of(level: Level) -> Style {
        let (tone, emphasis) = match level {
            Level::Trace => (Tone::Neutral, false),
            Level::Debug | Level::Info => (Tone::Info, false),
            Level::Warn => (Tone::Warn, false),
            Level::Error => (Tone::Error, false),
            Level::Critical => (Tone::Error, true),
        };
        Style { tone, emphasis }
    }
}

/// A trait representing something that shows rendered lines to a human.
///
/// Implementors own any decoration (colors, emphasis) and the actual terminal write.
pub trait Presenter: fmt::Debug + Send + Sync + 'static {
    /// Presents one rendered line, without a trailing line separator, in `style`.
    fn present(&self, style: Style, line: &str);
}

impl<T: Presenter> From<T> for Box<dyn Presenter> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
