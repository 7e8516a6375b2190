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

use std::fs;
use std::fs::File;
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::ArchiveStage;
use crate::Error;
use crate::ErrorKind;

/// Return where the archive of `source` is written: `<file name>.zip` in the same directory.
pub fn archive_path(source: &Path) -> Option<PathBuf> {
    let name = source.file_name()?;
    let mut archive = name.to_os_string();
    archive.push(".zip");
    Some(source.with_file_name(archive))
}

/// Compress `source` into a single-entry zip archive next to it.
///
/// The entry is named after the source file and keeps its modification time. The archive is
/// built in `<file name>.zip.tmp` and only replaces an existing archive once its central
/// directory has been finalized, so a failed run leaves the previous archive intact.
///
/// # Errors
///
/// Returns an [`ErrorKind::Archive`] error naming the failed [`ArchiveStage`].
pub fn archive(source: &Path) -> Result<PathBuf, Error> {
    let (target, entry_name) = match (archive_path(source), source.file_name()) {
        (Some(target), Some(name)) => (target, name.to_string_lossy().into_owned()),
        _ => {
            return Err(Error::new(
                ErrorKind::Archive(ArchiveStage::ReadSource),
                "log file path has no file name",
            )
            .with_context("path", source.display()));
        }
    };

    let mut log_file = File::open(source).map_err(failed(ArchiveStage::ReadSource, source))?;
    let metadata = log_file
        .metadata()
        .map_err(failed(ArchiveStage::ReadSource, source))?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(last_modified_time(&metadata));

    let partial = partial_path(&target);
    let written = write_entry(&partial, &mut log_file, entry_name, options, source)
        .and_then(|()| {
            fs::rename(&partial, &target).map_err(failed(ArchiveStage::Finalize, source))
        });
    if let Err(err) = written {
        let _ = fs::remove_file(&partial);
        return Err(err);
    }
    Ok(target)
}

fn partial_path(target: &Path) -> PathBuf {
    let mut partial = target.as_os_str().to_os_string();
    partial.push(".tmp");
    PathBuf::from(partial)
}

fn write_entry(
    partial: &Path,
    log_file: &mut File,
    entry_name: String,
    options: SimpleFileOptions,
    source: &Path,
) -> Result<(), Error> {
    let archive_file =
        File::create(partial).map_err(failed(ArchiveStage::CreateArchive, source))?;
    let mut writer = ZipWriter::new(archive_file);
    writer
        .start_file(entry_name, options)
        .map_err(failed(ArchiveStage::CreateArchive, source))?;

    io::copy(log_file, &mut writer).map_err(failed(ArchiveStage::Copy, source))?;

    writer.finish().map_err(failed(ArchiveStage::Finalize, source))?;
    Ok(())
}

fn failed<E>(stage: ArchiveStage, source: &Path) -> impl FnOnce(E) -> Error + use<E>
where
    E: Into<anyhow::Error>,
{
    let path = source.display().to_string();
    move |err| Error::from_archive_error(stage, err).with_context("path", path)
}

// zip stores local wall clock time, starting from 1980
fn last_modified_time(metadata: &Metadata) -> DateTime {
    let Some(modified) = metadata
        .modified()
        .ok()
        .and_then(|time| Timestamp::try_from(time).ok())
    else {
        return DateTime::default();
    };

    let zoned = modified.to_zoned(TimeZone::system());
    u16::try_from(zoned.year())
        .ok()
        .and_then(|year| {
            DateTime::from_date_and_time(
                year,
                zoned.month() as u8,
                zoned.day() as u8,
                zoned.hour() as u8,
                zoned.minute() as u8,
                zoned.second() as u8,
            )
            .ok()
        })
        .unwrap_or_default()
}
