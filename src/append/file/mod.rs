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

//! Appender for writing log lines to a file rotated by size or age.
//!
//! A [`FileSink`] appends one line per write. Before each write, the file is checked against a
//! [`RotationPolicy`]: once it has grown to `max_file_size` bytes, or was last modified more than
//! `max_age_days` ago, it is compressed into `<file name>.zip` next to it (when
//! `archive_on_rotate` is set), removed and created again.
//!
//! # Example
//!
//! ```
//! use rotalog::append::file::FileSink;
//! use rotalog::append::file::RotationConfig;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = RotationConfig {
//!     file_path: dir.path().join("app.log"),
//!     max_file_size: 16,
//!     ..RotationConfig::default()
//! };
//!
//! let sink = FileSink::new();
//! sink.write(&config, "a line longer than sixteen bytes").unwrap();
//! sink.write(&config, "triggers a rotation").unwrap();
//!
//! assert!(dir.path().join("app.log.zip").exists());
//! ```

pub use archive::archive;
pub use archive::archive_path;
pub use rotation::DEFAULT_FILE_PATH;
pub use rotation::DEFAULT_MAX_AGE_DAYS;
pub use rotation::DEFAULT_MAX_FILE_SIZE;
pub use rotation::RotationConfig;
pub use rotation::RotationPolicy;
pub use rotation::RotationReason;
pub use sink::FileSink;

mod archive;
mod rotation;
mod sink;
