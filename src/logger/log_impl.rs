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

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use jiff::Timestamp;

use crate::Error;
use crate::append::Console;
use crate::append::FileSink;
use crate::append::Presenter;
use crate::append::Style;
use crate::logger::CallSite;
use crate::logger::LoggerConfig;
use crate::logger::StreamMode;
use crate::record::Level;
use crate::record::Record;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A leveled logger writing rendered lines to the console, a rotating file, or both.
///
/// # Examples
///
/// ```
/// use rotalog::Logger;
/// use rotalog::StreamMode;
/// use rotalog::record::Level;
///
/// let dir = tempfile::tempdir().unwrap();
///
/// let mut logger = Logger::new();
/// logger.set_level(Level::Debug);
/// logger.set_stream(StreamMode::File);
/// logger.set_file_path(dir.path().join("app.log"));
///
/// logger.debug(format_args!("connected to {} in {}ms", "db-1", 12)).unwrap();
/// rotalog::warn!(logger, "retrying in {}s", 5).unwrap();
/// ```
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
    presenter: Box<dyn Presenter>,
    trap: Box<dyn Trap>,
    sink: FileSink,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a new [`Logger`] with the default [`LoggerConfig`].
    ///
    /// Lines at [`Level::Info`] and above go to `access.log`, which is rotated at 50 MiB or after
    /// 7 days and archived on rotation.
    pub fn new() -> Logger {
        Self {
            config: LoggerConfig::default(),
            presenter: Box::new(Console::default()),
            trap: Box::new(DefaultTrap::default()),
            sink: FileSink::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the presenter console lines are handed to.
    pub fn with_presenter(mut self, presenter: impl Into<Box<dyn Presenter>>) -> Self {
        self.presenter = presenter.into();
        self
    }

    /// Set the trap for errors that cannot be returned.
    pub fn with_trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// The current configuration.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Set the minimum level a record needs to be emitted.
    pub fn set_level(&mut self, level: Level) {
        self.config.level = level;
    }

    /// Set the placeholder template lines are rendered with.
    pub fn set_format(&mut self, format: impl Into<String>) {
        self.config.layout.template = format.into();
    }

    /// Set which sinks receive rendered lines.
    pub fn set_stream(&mut self, stream: StreamMode) {
        self.config.stream = stream;
    }

    /// Set the strftime format of `%(asctime)`.
    pub fn set_time_format(&mut self, time_format: impl Into<String>) {
        self.config.layout.time_format = time_format.into();
    }

    /// Set the log file path.
    pub fn set_file_path(&mut self, file_path: impl Into<PathBuf>) {
        self.config.rotation.file_path = file_path.into();
    }

    /// Set the size in bytes at which the log file is rotated.
    pub fn set_max_file_size(&mut self, max_file_size: u64) {
        self.config.rotation.max_file_size = max_file_size;
    }

    /// Set the age in days after which the log file is rotated.
    pub fn set_max_age_days(&mut self, max_age_days: u32) {
        self.config.rotation.max_age_days = max_age_days;
    }

    /// Set whether the log file is archived before it is rotated.
    pub fn set_archive_on_rotate(&mut self, archive_on_rotate: bool) {
        self.config.rotation.archive_on_rotate = archive_on_rotate;
    }

    /// Set whether a critical record exits the process.
    pub fn set_exit_on_critical(&mut self, exit_on_critical: bool) {
        self.config.exit_on_critical = exit_on_critical;
    }

    /// Return `true` if a record at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.config.level
    }

    /// Emit a record at `level` from `site`.
    ///
    /// Records below the configured level return immediately: `args` is not formatted and
    /// nothing is presented or written.
    ///
    /// A critical record exits the process with status 1 once delivery has been attempted if
    /// exit on critical is set. A delivery error is handed to the trap before exiting.
    ///
    /// # Errors
    ///
    /// Returns the error of the file sink, see [`FileSink::write`].
    pub fn emit(
        &self,
        level: Level,
        site: CallSite<'_>,
        args: fmt::Arguments<'_>,
    ) -> Result<(), Error> {
        if !Logger::enabled(self, level) {
            return Ok(());
        }

        let result = self.deliver(level, site, args);

        if level == Level::Critical && self.config.exit_on_critical {
            if let Err(err) = &result {
                self.trap.trap(err);
            }
            std::process::exit(1);
        }

        result
    }

    fn deliver(
        &self,
        level: Level,
        site: CallSite<'_>,
        args: fmt::Arguments<'_>,
    ) -> Result<(), Error> {
        let payload = match args.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(args.to_string()),
        };
        let record = Record::new(Timestamp::now(), level, site.file(), site.line(), payload);
        let line = self.config.layout.format(&record);

        if self.config.stream.includes_console() {
            self.presenter.present(Style::of(level), &line);
        }

        if self.config.stream.includes_file() {
            self.sink.write(&self.config.rotation, &line)?;
        }

        Ok(())
    }

    /// Emit a [`Level::Trace`] record from the caller's location.
    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        self.emit(Level::Trace, CallSite::caller(), args)
    }

    /// Emit a [`Level::Debug`] record from the caller's location.
    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        self.emit(Level::Debug, CallSite::caller(), args)
    }

    /// Emit a [`Level::Info`] record from the caller's location.
    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        self.emit(Level::Info, CallSite::caller(), args)
    }

    /// Emit a [`Level::Warn`] record from the caller's location.
    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        self.emit(Level::Warn, CallSite::caller(), args)
    }

    /// Emit a [`Level::Error`] record from the caller's location.
    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        self.emit(Level::Error, CallSite::caller(), args)
    }

    /// Emit a [`Level::Critical`] record from the caller's location.
    ///
    /// Exits the process after delivery if exit on critical is set.
    #[track_caller]
    pub fn critical(&self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        self.emit(Level::Critical, CallSite::caller(), args)
    }

    #[cfg(feature = "bridge-log")]
    pub(crate) fn trap(&self, err: &Error) {
        self.trap.trap(err);
    }
}
