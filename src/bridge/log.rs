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

use crate::Logger;
use crate::logger::CallSite;
use crate::record::Level;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

// the log crate has no critical level, its error filter lets the records through to our gate
fn level_filter(level: Level) -> log::LevelFilter {
    match level {
        Level::Trace => log::LevelFilter::Trace,
        Level::Debug => log::LevelFilter::Debug,
        Level::Info => log::LevelFilter::Info,
        Level::Warn => log::LevelFilter::Warn,
        Level::Error | Level::Critical => log::LevelFilter::Error,
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] with `logger`, so that all logs from the log
/// crate are emitted by it. Delivery errors are handed to the logger's
/// [`Trap`](crate::trap::Trap).
///
/// The global maximum log level is set to match the logger's level.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// let logger = rotalog::Logger::new();
/// rotalog::bridge::try_setup_log_crate(logger).unwrap();
/// ```
pub fn try_setup_log_crate(logger: Logger) -> Result<(), log::SetLoggerError> {
    let max_level = level_filter(logger.config().level);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(())
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate(logger: Logger) {
    try_setup_log_crate(logger).expect(
        "rotalog::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let site = CallSite::new(
            record.file().unwrap_or_default(),
            record.line().unwrap_or_default(),
        );
        if let Err(err) = self.emit(record.level().into(), site, *record.args()) {
            self.trap(&err);
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;
    use std::sync::Mutex;

    use tempfile::TempDir;

    use super::*;
    use crate::Error;
    use crate::StreamMode;
    use crate::trap::Trap;

    #[derive(Debug, Default, Clone)]
    struct Collect(Arc<Mutex<Vec<String>>>);

    impl Trap for Collect {
        fn trap(&self, err: &Error) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    #[test]
    fn test_log_records_are_emitted() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let mut logger = Logger::new();
        logger.set_stream(StreamMode::File);
        logger.set_format("%(levelname) %(filename):%(lineno) %(message)");
        logger.set_file_path(temp_dir.path().join("app.log"));

        let depth = 42;
        log::Log::log(
            &logger,
            &log::Record::builder()
                .level(log::Level::Warn)
                .file(Some("src/server.rs"))
                .line(Some(120))
                .args(format_args!("queue depth {depth}"))
                .build(),
        );

        let filtered = log::Record::builder()
            .level(log::Level::Debug)
            .args(format_args!("hidden"))
            .build();
        assert!(!log::Log::enabled(&logger, filtered.metadata()));
        log::Log::log(&logger, &filtered);

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("app.log")).unwrap(),
            "WARN server.rs:120 queue depth 42\n"
        );
    }

    #[test]
    fn test_delivery_errors_go_to_trap() {
        let trap = Collect::default();
        let mut logger = Logger::new().with_trap(trap.clone());
        logger.set_file_path("");

        let record = log::Record::builder()
            .level(log::Level::Error)
            .args(format_args!("lost"))
            .build();
        log::Log::log(&logger, &record);

        let trapped = trap.0.lock().unwrap();
        assert_eq!(trapped.len(), 1);
        assert!(trapped[0].contains("file path not specified"));
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(level_filter(Level::Critical), log::LevelFilter::Error);
        assert_eq!(level_filter(Level::Info), log::LevelFilter::Info);
        assert_eq!(Level::from(log::Level::Trace), Level::Trace);
    }
}
