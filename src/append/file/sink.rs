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
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;

use jiff::Timestamp;

use crate::Error;
use crate::ErrorKind;
use crate::IoOperation;
use crate::append::file::RotationConfig;
use crate::append::file::RotationPolicy;
use crate::append::file::RotationReason;
use crate::append::file::archive::archive;

/// A sink that appends lines to a log file, rotating it by size or age.
///
/// Every [`FileSink::write`] opens the file, checks the [`RotationPolicy`], rotates when due and
/// appends the line; no file handle is kept between writes. Writes through the same sink are
/// serialized, writes through different sinks pointed at the same file are not.
///
/// # Examples
///
/// ```no_run
/// use rotalog::append::file::FileSink;
/// use rotalog::append::file::RotationConfig;
///
/// let sink = FileSink::default();
/// let config = RotationConfig::default();
/// sink.write(&config, "service started").unwrap();
/// ```
pub struct FileSink {
    lock: Mutex<()>,
    // source of "now" for the age check
    now: fn() -> Timestamp,
    // removes the log file on rotation
    remove: fn(&Path) -> io::Result<()>,
}

impl fmt::Debug for FileSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSink").finish_non_exhaustive()
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSink {
    /// Create a new [`FileSink`].
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            now: Timestamp::now,
            remove: |path| fs::remove_file(path),
        }
    }

    /// Append `line` and a trailing line separator to the configured file.
    ///
    /// When the file is due for rotation it is archived (if enabled), removed and created
    /// again before the line is appended. At most one rotation happens per call.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::Config`] if the configured path is empty; nothing is written.
    /// * [`ErrorKind::Archive`] if archiving failed. The rotation and the write still happened.
    /// * [`ErrorKind::Io`] with [`IoOperation::Delete`] if the old file could not be removed. The
    ///   rotation is abandoned and the line is appended to the old file.
    /// * [`ErrorKind::Io`] for any other failing file operation.
    ///
    /// When several of these happen in one call, the first one is returned and the later ones
    /// are attached as its sources.
    pub fn write(&self, config: &RotationConfig, line: &str) -> Result<(), Error> {
        let path = config.file_path.as_path();
        if path.as_os_str().is_empty() {
            let err = Error::new(ErrorKind::Config, "file path not specified for logging");
            return Err(err);
        }

        // the file on disk is the guarded state, so a poisoned lock protects nothing stale
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut file = open_log_file(path, IoOperation::Open)?;
        let (size, modified) = stat(&file, path)?;

        let mut errors = vec![];
        let policy = RotationPolicy::from(config);
        if let Some(reason) = policy.check(size, modified, (self.now)()) {
            drop(file);
            file = match rotate(config, reason, self.remove) {
                Ok((file, archive_error)) => {
                    errors.extend(archive_error);
                    file
                }
                Err(RotateError::Abandoned(err)) => {
                    errors.push(err);
                    match open_log_file(path, IoOperation::Open) {
                        Ok(file) => file,
                        Err(err) => return Err(merge(err, errors)),
                    }
                }
                Err(RotateError::Failed(err)) => return Err(merge(err, errors)),
            };
        }

        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        if let Err(err) = file.write_all(&bytes) {
            let err = Error::from_io_error(IoOperation::Write, err)
                .with_context("path", path.display());
            return Err(merge(err, errors));
        }

        let mut errors = errors.into_iter();
        match errors.next() {
            None => Ok(()),
            Some(first) => Err(merge(first, errors)),
        }
    }
}

enum RotateError {
    // the old file is still in place
    Abandoned(Error),
    // the old file is gone and no new file could be created
    Failed(Error),
}

fn rotate(
    config: &RotationConfig,
    reason: RotationReason,
    remove: fn(&Path) -> io::Result<()>,
) -> Result<(File, Option<Error>), RotateError> {
    let path = config.file_path.as_path();

    let archive_error = if config.archive_on_rotate {
        archive(path)
            .err()
            .map(|err| err.with_context("reason", reason))
    } else {
        None
    };

    if let Err(err) = remove(path) {
        let err = Error::from_io_error(IoOperation::Delete, err)
            .with_context("path", path.display())
            .with_context("reason", reason);
        return Err(RotateError::Abandoned(merge(err, archive_error)));
    }

    match open_log_file(path, IoOperation::Create) {
        Ok(file) => Ok((file, archive_error)),
        Err(err) => Err(RotateError::Failed(merge(err, archive_error))),
    }
}

fn open_log_file(path: &Path, op: IoOperation) -> Result<File, Error> {
    let failed = |err| Error::from_io_error(op, err).with_context("path", path.display());

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(failed)?;
    }

    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(failed)
}

fn stat(file: &File, path: &Path) -> Result<(u64, Timestamp), Error> {
    let failed = |err| {
        Error::from_io_error(IoOperation::Stat, err).with_context("path", path.display())
    };

    let metadata = file.metadata().map_err(failed)?;
    let modified = metadata.modified().map_err(failed)?;
    let modified = Timestamp::try_from(modified).map_err(|err| {
        Error::new(
            ErrorKind::Io(IoOperation::Stat),
            "modification time out of range",
        )
        .with_context("path", path.display())
        .with_source(err)
    })?;
    Ok((metadata.len(), modified))
}

fn merge(first: Error, rest: impl IntoIterator<Item = Error>) -> Error {
    rest.into_iter().fold(first, |acc, err| acc.with_source(err))
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::path::PathBuf;

    use jiff::SignedDuration;
    use tempfile::TempDir;

    use super::*;
    use crate::ArchiveStage;
    use crate::append::file::archive::archive_path;

    fn config(dir: &TempDir, max_file_size: u64) -> RotationConfig {
        RotationConfig {
            file_path: dir.path().join("app.log"),
            max_file_size,
            ..RotationConfig::default()
        }
    }

    fn read_archive(path: &Path) -> String {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut entry = archive.by_index(0).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_write_appends_lines() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = config(&temp_dir, 1024);
        let sink = FileSink::new();

        sink.write(&config, "one").unwrap();
        sink.write(&config, "two").unwrap();

        assert_eq!(fs::read_to_string(&config.file_path).unwrap(), "one\ntwo\n");
        assert!(!archive_path(&config.file_path).unwrap().exists());
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = RotationConfig {
            file_path: temp_dir.path().join("nested").join("dir").join("app.log"),
            ..RotationConfig::default()
        };

        FileSink::new().write(&config, "hello").unwrap();
        assert_eq!(fs::read_to_string(&config.file_path).unwrap(), "hello\n");
    }

    #[test]
    fn test_empty_path_is_config_error() {
        let config = RotationConfig {
            file_path: PathBuf::new(),
            ..RotationConfig::default()
        };
        let err = FileSink::new().write(&config, "lost").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_rotate_on_size_archives_previous_content() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = config(&temp_dir, 10);
        let sink = FileSink::new();

        sink.write(&config, "first line over ten bytes").unwrap();
        sink.write(&config, "second line over ten bytes").unwrap();

        assert_eq!(
            fs::read_to_string(&config.file_path).unwrap(),
            "second line over ten bytes\n"
        );
        let archive = archive_path(&config.file_path).unwrap();
        assert_eq!(read_archive(&archive), "first line over ten bytes\n");
    }

    #[test]
    fn test_rotate_without_archive() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = RotationConfig {
            archive_on_rotate: false,
            ..config(&temp_dir, 10)
        };
        let sink = FileSink::new();

        sink.write(&config, "first line over ten bytes").unwrap();
        sink.write(&config, "second line over ten bytes").unwrap();

        assert_eq!(
            fs::read_to_string(&config.file_path).unwrap(),
            "second line over ten bytes\n"
        );
        assert!(!archive_path(&config.file_path).unwrap().exists());
    }

    #[test]
    fn test_rotate_on_age() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = config(&temp_dir, 1024);
        let sink = FileSink::new();

        sink.write(&config, "old").unwrap();
        sink.write(&config, "still fresh").unwrap();
        assert_eq!(
            fs::read_to_string(&config.file_path).unwrap(),
            "old\nstill fresh\n"
        );

        let sink = FileSink {
            now: || Timestamp::now() + SignedDuration::from_hours(8 * 24),
            ..FileSink::new()
        };
        sink.write(&config, "new").unwrap();

        assert_eq!(fs::read_to_string(&config.file_path).unwrap(), "new\n");
        let archive = archive_path(&config.file_path).unwrap();
        assert_eq!(read_archive(&archive), "old\nstill fresh\n");
    }

    #[test]
    fn test_archive_failure_still_rotates_and_writes() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = config(&temp_dir, 10);
        let sink = FileSink::new();
        // a directory in the way of the archive file
        fs::create_dir(archive_path(&config.file_path).unwrap()).unwrap();

        sink.write(&config, "first line over ten bytes").unwrap();
        let err = sink
            .write(&config, "second line over ten bytes")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Archive(ArchiveStage::Finalize));
        assert_eq!(err.context("reason"), Some("max size reached"));
        assert_eq!(
            fs::read_to_string(&config.file_path).unwrap(),
            "second line over ten bytes\n"
        );
    }

    fn deny_remove(_: &Path) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::PermissionDenied))
    }

    #[test]
    fn test_delete_failure_abandons_rotation() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = config(&temp_dir, 10);
        let sink = FileSink {
            remove: deny_remove,
            ..FileSink::new()
        };

        sink.write(&config, "first line over ten bytes").unwrap();
        let err = sink
            .write(&config, "second line over ten bytes")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io(IoOperation::Delete));
        assert_eq!(err.context("reason"), Some("max size reached"));
        assert_eq!(err.sources().len(), 1);
        // the line lands in the old file instead of being lost
        assert_eq!(
            fs::read_to_string(&config.file_path).unwrap(),
            "first line over ten bytes\nsecond line over ten bytes\n"
        );
        let archive = archive_path(&config.file_path).unwrap();
        assert_eq!(read_archive(&archive), "first line over ten bytes\n");
    }

    #[test]
    fn test_delete_failure_carries_archive_failure() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = config(&temp_dir, 10);
        let sink = FileSink {
            remove: deny_remove,
            ..FileSink::new()
        };
        fs::create_dir(archive_path(&config.file_path).unwrap()).unwrap();

        sink.write(&config, "first line over ten bytes").unwrap();
        let err = sink
            .write(&config, "second line over ten bytes")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io(IoOperation::Delete));
        let sources = err.sources().collect::<Vec<_>>();
        assert_eq!(sources.len(), 2);
        let archive_err = sources[1].downcast_ref::<Error>().unwrap();
        assert_eq!(archive_err.kind(), ErrorKind::Archive(ArchiveStage::Finalize));
        assert_eq!(
            fs::read_to_string(&config.file_path).unwrap(),
            "first line over ten bytes\nsecond line over ten bytes\n"
        );
    }

    #[test]
    fn test_recreate_failure_after_delete() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = config(&temp_dir, 10);
        let sink = FileSink {
            // a directory takes the place of the removed file
            remove: |path| {
                fs::remove_file(path)?;
                fs::create_dir(path)
            },
            ..FileSink::new()
        };

        sink.write(&config, "first line over ten bytes").unwrap();
        let err = sink
            .write(&config, "second line over ten bytes")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io(IoOperation::Create));
        let archive = archive_path(&config.file_path).unwrap();
        assert_eq!(read_archive(&archive), "first line over ten bytes\n");
    }

    #[test]
    fn test_concurrent_writes_rotate_cleanly() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let config = RotationConfig {
            archive_on_rotate: false,
            ..config(&temp_dir, 64)
        };
        let sink = FileSink::new();

        std::thread::scope(|s| {
            for t in 0..4 {
                let sink = &sink;
                let config = &config;
                s.spawn(move || {
                    for i in 0..50 {
                        sink.write(config, &format!("thread {t} line {i:02}"))
                            .unwrap();
                    }
                });
            }
        });

        let content = fs::read_to_string(&config.file_path).unwrap();
        assert!(content.ends_with('\n'));
        for line in content.lines() {
            assert!(line.starts_with("thread "), "torn line: {line:?}");
            assert_eq!(line.len(), "thread 0 line 00".len());
        }
        // rotation keeps the live file bounded by the threshold plus one line
        assert!(content.len() < 64 + "thread 0 line 00\n".len());
    }
}
