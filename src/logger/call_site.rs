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

use std::panic::Location;

/// The source location a log call was made from.
///
/// The severity methods of [`Logger`](crate::Logger) resolve it with [`CallSite::caller`], the
/// macros with `file!()` and `line!()`. Construct one directly to log on behalf of another
/// location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite<'a> {
    file: &'a str,
    line: u32,
}

impl<'a> CallSite<'a> {
    /// Create a call site from a file path and a line number.
    pub const fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// The source file.
    pub fn file(&self) -> &'a str {
        self.file
    }

    /// The line in the source file.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl CallSite<'static> {
    /// Resolve the location of the caller.
    ///
    /// Inside a `#[track_caller]` function this is the location that function was called from.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }
}
