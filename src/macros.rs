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

/// Emit a record at the given level from the location of the macro call.
///
/// The remaining arguments are formatted like [`format_args!`]. Evaluates to the
/// `Result<(), rotalog::Error>` of [`Logger::emit`](crate::Logger::emit).
///
/// # Examples
///
/// ```
/// use rotalog::Logger;
/// use rotalog::record::Level;
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut logger = Logger::new();
/// logger.set_file_path(dir.path().join("app.log"));
///
/// rotalog::emit!(logger, Level::Info, "listening on port {}", 8080).unwrap();
/// ```
#[macro_export]
macro_rules! emit {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.emit(
            $level,
            $crate::CallSite::new(::std::file!(), ::std::line!()),
            ::std::format_args!($($arg)+),
        )
    };
}

/// Emit a [`Level::Trace`](crate::record::Level::Trace) record, see [`emit!`].
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::record::Level::Trace, $($arg)+)
    };
}

/// Emit a [`Level::Debug`](crate::record::Level::Debug) record, see [`emit!`].
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::record::Level::Debug, $($arg)+)
    };
}

/// Emit a [`Level::Info`](crate::record::Level::Info) record, see [`emit!`].
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::record::Level::Info, $($arg)+)
    };
}

/// Emit a [`Level::Warn`](crate::record::Level::Warn) record, see [`emit!`].
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::record::Level::Warn, $($arg)+)
    };
}

/// Emit a [`Level::Error`](crate::record::Level::Error) record, see [`emit!`].
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::record::Level::Error, $($arg)+)
    };
}

/// Emit a [`Level::Critical`](crate::record::Level::Critical) record, see [`emit!`].
///
/// Exits the process after delivery if exit on critical is set.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::emit!($logger, $crate::record::Level::Critical, $($arg)+)
    };
}
