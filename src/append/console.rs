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

use std::io::Write;

use colored::Color;
use colored::ColoredString;
use colored::Colorize;

use crate::append::Presenter;
use crate::append::Style;
use crate::append::Tone;

/// Customize the color of each tone.
#[derive(Debug, Clone)]
pub struct ToneColor {
    /// Color for neutral lines.
    pub neutral: Color,
    /// Color for informational lines.
    pub info: Color,
    /// Color for warning lines.
    pub warn: Color,
    /// Color for error lines.
    pub error: Color,
}

impl Default for ToneColor {
    fn default() -> Self {
        Self {
            neutral: Color::White,
            info: Color::Blue,
            warn: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl ToneColor {
    /// Colorize `line` according to `style`.
    ///
    /// Emphasized lines are additionally bold and underlined.
    pub fn colorize(&self, no_color: bool, style: Style, line: &str) -> ColoredString {
        if no_color {
            return ColoredString::from(line);
        }

        let color = match style.tone {
            Tone::Neutral => self.neutral,
            Tone::Info => self.info,
            Tone::Warn => self.warn,
            Tone::Error => self.error,
        };
        let colored = line.color(color);
        if style.emphasis {
            colored.bold().underline()
        } else {
            colored
        }
    }
}

/// A presenter that prints colored lines to stdout.
///
/// # Examples
///
/// ```
/// use rotalog::append::Console;
///
/// let console = Console::default().no_color();
/// ```
#[derive(Debug, Default)]
pub struct Console {
    colors: ToneColor,
    no_color: bool,
}

impl Console {
    /// Disable colors and emphasis.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Customize the color of each tone.
    pub fn colors(mut self, colors: ToneColor) -> Self {
        self.colors = colors;
        self
    }
}

impl Presenter for Console {
    fn present(&self, style: Style, line: &str) {
        let line = self.colors.colorize(self.no_color, style, line);
        // the terminal is best effort, a closed stdout must not fail the log call
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
        let _ = stdout.flush();
    }
}
