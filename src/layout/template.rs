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

use jiff::fmt::strtime::BrokenDownTime;
use jiff::tz::TimeZone;

use crate::record::Record;

/// The template used by [`TemplateLayout::default`].
pub const DEFAULT_TEMPLATE: &str = "%(asctime) [%(levelname)] - [%(filename).%(lineno)]: %(message)";

/// The strftime format used by [`TemplateLayout::default`].
///
/// Renders like `Sun, 11 Aug, 2024 22:44:57`.
pub const DEFAULT_TIME_FORMAT: &str = "%a, %d %b, %Y %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Time,
    Level,
    File,
    Line,
    Message,
}

impl Placeholder {
    fn lookup(name: &str) -> Option<Placeholder> {
        match name {
            "asctime" => Some(Placeholder::Time),
            "levelname" => Some(Placeholder::Level),
            "filename" => Some(Placeholder::File),
            "lineno" => Some(Placeholder::Line),
            "message" => Some(Placeholder::Message),
            _ => None,
        }
    }
}

/// Substitute the named placeholders of `template`.
///
/// The recognized placeholders are `%(asctime)`, `%(levelname)`, `%(filename)`, `%(lineno)` and
/// `%(message)`. Anything else, including unknown `%(name)` tokens and an unterminated `%(`, is
/// copied verbatim.
///
/// The template is scanned once from left to right and substituted values are never scanned
/// again, so a message that itself contains `%(message)` is emitted as is.
///
/// # Examples
///
/// ```
/// use rotalog::layout::render;
///
/// let line = render("[%(levelname)] %(message)", "WARN", "disk at 91%", "main.rs", 42, "now");
/// assert_eq!(line, "[WARN] disk at 91%");
/// ```
pub fn render(
    template: &str,
    level: &str,
    message: &str,
    file: &str,
    line: u32,
    timestamp: &str,
) -> String {
    let mut text = String::with_capacity(template.len() + message.len() + timestamp.len());
    let mut rest = template;

    while let Some(start) = rest.find("%(") {
        text.push_str(&rest[..start]);
        let tail = &rest[start + 2..];

        let Some(end) = tail.find(')') else {
            // unterminated, the remainder is literal text
            text.push_str(&rest[start..]);
            return text;
        };

        match Placeholder::lookup(&tail[..end]) {
            Some(placeholder) => {
                match placeholder {
                    Placeholder::Time => text.push_str(timestamp),
                    Placeholder::Level => text.push_str(level),
                    Placeholder::File => text.push_str(file),
                    Placeholder::Line => text.push_str(&line.to_string()),
                    Placeholder::Message => text.push_str(message),
                }
                rest = &tail[end + 1..];
            }
            None => {
                // keep the opener and resume right after it, so `%(%(message)` still substitutes
                text.push_str("%(");
                rest = tail;
            }
        }
    }

    text.push_str(rest);
    text
}

/// A layout that renders log records through a placeholder template.
///
/// Output format with the default template and time format:
///
/// ```text
/// Sun, 11 Aug, 2024 22:44:57 [ERROR] - [rolling_file.rs.51]: Hello error!
/// Sun, 11 Aug, 2024 22:44:57 [WARN] - [rolling_file.rs.52]: Hello warn!
/// Sun, 11 Aug, 2024 22:44:57 [INFO] - [rolling_file.rs.53]: Hello info!
/// ```
///
/// The time format is a strftime string interpreted by [`jiff`]. If it cannot be applied, the
/// timestamp falls back to RFC 3339 so that rendering never fails.
///
/// You can customize the timezone of the timestamp with [`TemplateLayout::timezone`]. Otherwise,
/// the system timezone is used.
///
/// # Examples
///
/// ```
/// use rotalog::layout::TemplateLayout;
///
/// let layout = TemplateLayout::default().template("%(levelname) %(message)");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateLayout {
    /// The placeholder template, see [`render`].
    pub template: String,
    /// The strftime format of `%(asctime)`.
    pub time_format: String,
    /// The timezone of `%(asctime)`; the system timezone when `None`.
    pub tz: Option<TimeZone>,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            tz: None,
        }
    }
}

impl TemplateLayout {
    /// Set the placeholder template.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the strftime time format.
    pub fn time_format(mut self, time_format: impl Into<String>) -> Self {
        self.time_format = time_format.into();
        self
    }

    /// Set the timezone for timestamps.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    /// Render `record` into a single line, without a trailing line separator.
    pub fn format(&self, record: &Record) -> String {
        let tz = self.tz.clone().unwrap_or_else(TimeZone::system);
        let zoned = record.time().to_zoned(tz);
        let time = BrokenDownTime::from(&zoned)
            .to_string(&self.time_format)
            .unwrap_or_else(|_| zoned.timestamp().to_string());

        render(
            &self.template,
            record.level().as_str(),
            record.payload(),
            &record.filename(),
            record.line(),
            &time,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use jiff::Timestamp;

    use super::*;
    use crate::record::Level;

    fn render_message(template: &str, message: &str) -> String {
        render(template, "INFO", message, "main.rs", 42, "2024-08-11")
    }

    #[test]
    fn test_render_all_placeholders() {
        let line = render(DEFAULT_TEMPLATE, "ERROR", "boom", "main.rs", 42, "2024-08-11");
        assert_eq!(line, "2024-08-11 [ERROR] - [main.rs.42]: boom");
    }

    #[test]
    fn test_render_is_not_recursive() {
        let message = "user typed %(levelname) and %(message)";
        let line = render_message("%(levelname): %(message)", message);
        assert_eq!(line, "INFO: user typed %(levelname) and %(message)");
        assert_eq!(line.matches(message).count(), 1);
    }

    #[test]
    fn test_render_keeps_unknown_tokens() {
        assert_eq!(
            render_message("%(thread) %(message) %(", "hi"),
            "%(thread) hi %("
        );
        assert_eq!(render_message("%(%(message)", "hi"), "%(hi");
        assert_eq!(render_message("100% %(message)", "done"), "100% done");
        assert_eq!(render_message("no placeholders", "hi"), "no placeholders");
    }

    #[test]
    fn test_render_is_deterministic() {
        let messages = ["", "plain", "with ) paren", "tabs\tand unicode ✓"];
        for message in messages {
            let a = render_message(DEFAULT_TEMPLATE, message);
            let b = render_message(DEFAULT_TEMPLATE, message);
            assert_eq!(a, b);
            assert!(a.ends_with(message));
        }
    }

    #[test]
    fn test_layout_format_default() {
        let now = Timestamp::from_str("2024-08-11T14:44:57Z").unwrap();
        let record = Record::new(now, Level::Warn, "src/rolling_file.rs", 52, "Hello warn!");
        let layout = TemplateLayout::default().timezone(TimeZone::UTC);
        insta::assert_snapshot!(
            layout.format(&record),
            @"Sun, 11 Aug, 2024 14:44:57 [WARN] - [rolling_file.rs.52]: Hello warn!"
        );
    }

    #[test]
    fn test_layout_format_custom_time_format() {
        let now = Timestamp::from_str("2024-08-11T14:44:57Z").unwrap();
        let record = Record::new(now, Level::Critical, "lib.rs", 1, "down");
        let layout = TemplateLayout::default()
            .template("%(asctime)|%(levelname)|%(message)")
            .time_format("%Y-%m-%dT%H:%M:%S")
            .timezone(TimeZone::UTC);
        insta::assert_snapshot!(layout.format(&record), @"2024-08-11T14:44:57|CRITICAL|down");
    }

    #[test]
    fn test_layout_falls_back_on_bad_time_format() {
        let now = Timestamp::from_str("2024-08-11T14:44:57Z").unwrap();
        let record = Record::new(now, Level::Info, "lib.rs", 1, "x");
        let layout = TemplateLayout::default()
            .template("%(asctime)")
            .time_format("%Y %")
            .timezone(TimeZone::UTC);
        assert_eq!(layout.format(&record), "2024-08-11T14:44:57Z");
    }
}
