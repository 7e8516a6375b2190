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

//! Rotalog is a leveled logger that renders messages through a placeholder template and delivers
//! them to the console, to a size/age rotated log file, or to both.
//!
//! # Overview
//!
//! Each [`Logger`] owns its configuration: a minimum [`Level`](record::Level), a [`StreamMode`],
//! a [`TemplateLayout`](layout::TemplateLayout) and a [`RotationConfig`](append::file::RotationConfig).
//! Records below the minimum level cost a comparison. Records at or above it are rendered once
//! and handed to the console [`Presenter`](append::Presenter) and/or the
//! [`FileSink`](append::FileSink), which rotates the file before a write once it is too big or too
//! old, archiving the previous content into `<file name>.zip`.
//!
//! No background thread or open file handle is kept between calls.
//!
//! # Examples
//!
//! ```
//! use rotalog::Logger;
//! use rotalog::StreamMode;
//! use rotalog::record::Level;
//!
//! let dir = tempfile::tempdir().unwrap();
//!
//! let mut logger = Logger::new();
//! logger.set_stream(StreamMode::Both);
//! logger.set_level(Level::Debug);
//! logger.set_file_path(dir.path().join("access.log"));
//! logger.set_max_file_size(10 * 1024 * 1024);
//!
//! rotalog::info!(logger, "listening on {}", "0.0.0.0:8080").unwrap();
//! logger.debug(format_args!("accepted {} connections", 3)).unwrap();
//! ```
//!
//! Failures of the file sink are returned to the caller:
//!
//! ```
//! use rotalog::ErrorKind;
//! use rotalog::Logger;
//!
//! let mut logger = Logger::new();
//! logger.set_file_path("");
//!
//! let err = logger.error(format_args!("nowhere to go")).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Config);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod layout;
pub mod record;
pub mod trap;

mod error;
pub use self::error::ArchiveStage;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::error::IoOperation;

mod logger;
pub use self::logger::CallSite;
pub use self::logger::Logger;
pub use self::logger::LoggerConfig;
pub use self::logger::StreamMode;

mod macros;
