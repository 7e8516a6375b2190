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
use std::io;

/// The filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoOperation {
    /// Opening the log file.
    Open,
    /// Reading the log file metadata.
    Stat,
    /// Appending to the log file.
    Write,
    /// Removing the log file during rotation.
    Delete,
    /// Creating the fresh log file after rotation.
    Create,
}

impl IoOperation {
    /// Return the string representation of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            IoOperation::Open => "open",
            IoOperation::Stat => "stat",
            IoOperation::Write => "write",
            IoOperation::Delete => "delete",
            IoOperation::Create => "create",
        }
    }
}

/// The archiving step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveStage {
    /// The source log file could not be opened or inspected.
    ReadSource,
    /// The archive file or its entry could not be created.
    CreateArchive,
    /// Copying the log content into the archive failed midway.
    Copy,
    /// Writing the central directory failed.
    Finalize,
}

impl ArchiveStage {
    /// Return the string representation of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveStage::ReadSource => "read source",
            ArchiveStage::CreateArchive => "create archive",
            ArchiveStage::Copy => "copy",
            ArchiveStage::Finalize => "finalize",
        }
    }
}

/// The kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The logger configuration cannot serve the request, e.g. an empty file path.
    Config,
    /// A filesystem operation on the log file failed.
    Io(IoOperation),
    /// Archiving the log file before rotation failed.
    ///
    /// This kind is never fatal to the write: the line is still appended.
    Archive(ArchiveStage),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Config => write!(f, "config"),
            ErrorKind::Io(op) => write!(f, "io({})", op.as_str()),
            ErrorKind::Archive(stage) => write!(f, "archive({})", stage.as_str()),
        }
    }
}

/// The error struct of rotalog.
pub struct Error {
    kind: ErrorKind,
    message: String,
    sources: Vec<anyhow::Error>,
    context: Vec<(&'static str, String)>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.sources.is_empty() {
            write!(f, ", sources: [")?;
            for (i, source) in self.sources.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{source}")?;
            }
            write!(f, "]")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            de.field("sources", &self.sources);
            return de.finish();
        }

        write!(f, "{} ({})", self.message, self.kind)?;
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }
        if !self.sources.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sources:")?;
            for source in self.sources.iter() {
                writeln!(f, "   {source:#}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.sources.first().map(|v| v.as_ref())
    }
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            sources: vec![],
            context: vec![],
        }
    }

    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the message of this error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Add one more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Add one more source in error.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.sources.push(src.into());
        self
    }

    /// Return the context value registered under `key`, if any.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Return an iterator over all sources of this error.
    pub fn sources(&self) -> impl ExactSizeIterator<Item = &(dyn std::error::Error + 'static)> {
        self.sources.iter().map(|v| v.as_ref())
    }

    /// Default constructor for [`Error`] from an [`io::Error`] raised by `op`.
    pub fn from_io_error(op: IoOperation, err: io::Error) -> Error {
        Error::new(
            ErrorKind::Io(op),
            format!("failed to {} log file", op.as_str()),
        )
        .with_source(err)
    }

    /// Default constructor for [`Error`] from a failed archiving `stage`.
    pub fn from_archive_error(stage: ArchiveStage, err: impl Into<anyhow::Error>) -> Error {
        Error::new(
            ErrorKind::Archive(stage),
            format!("failed to {} while archiving log file", stage.as_str()),
        )
        .with_source(err)
    }

    /// Return `true` if this error was raised while archiving.
    pub fn is_archive(&self) -> bool {
        matches!(self.kind, ErrorKind::Archive(_))
    }
}
