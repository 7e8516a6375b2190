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
use std::path::PathBuf;

use jiff::SignedDuration;
use jiff::Timestamp;

/// The default log file path, relative to the working directory.
pub const DEFAULT_FILE_PATH: &str = "access.log";

/// The default size threshold, 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// The default age threshold in days.
pub const DEFAULT_MAX_AGE_DAYS: u32 = 7;

/// Settings of the rotating log file.
///
/// `file_path` must not be empty whenever file output is active; this is checked on every write.
/// Both thresholds are expected to be positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    /// The log file to append to.
    pub file_path: PathBuf,
    /// Rotate once the file has grown to at least this many bytes.
    pub max_file_size: u64,
    /// Rotate once the file has not been modified for longer than this many days.
    pub max_age_days: u32,
    /// Compress the file into `<file name>.zip` before it is replaced.
    pub archive_on_rotate: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            archive_on_rotate: true,
        }
    }
}

/// Why a log file has to be rotated before the next write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationReason {
    /// The file reached the size threshold.
    SizeExceeded,
    /// The file was last modified before the age threshold.
    AgeExceeded,
}

impl fmt::Display for RotationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationReason::SizeExceeded => f.write_str("max size reached"),
            RotationReason::AgeExceeded => f.write_str("max age reached"),
        }
    }
}

/// Decides whether a log file must be rotated.
///
/// The policy only looks at the metadata it is given, so it can be driven by synthetic sizes and
/// clocks.
///
/// # Examples
///
/// ```
/// use jiff::Timestamp;
/// use rotalog::append::file::RotationPolicy;
/// use rotalog::append::file::RotationReason;
///
/// let policy = RotationPolicy::new(1024, 7);
/// let now = Timestamp::now();
/// assert_eq!(policy.check(4096, now, now), Some(RotationReason::SizeExceeded));
/// assert_eq!(policy.check(10, now, now), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    max_file_size: u64,
    max_age: SignedDuration,
}

impl RotationPolicy {
    /// Create a policy from a size threshold in bytes and an age threshold in days.
    pub fn new(max_file_size: u64, max_age_days: u32) -> Self {
        Self {
            max_file_size,
            max_age: SignedDuration::from_hours(i64::from(max_age_days) * 24),
        }
    }

    /// Check a file of `size` bytes last modified at `modified`, as seen at `now`.
    ///
    /// Size is checked first; the age is only considered when the file is under the size
    /// threshold.
    pub fn check(&self, size: u64, modified: Timestamp, now: Timestamp) -> Option<RotationReason> {
        if size >= self.max_file_size {
            return Some(RotationReason::SizeExceeded);
        }

        if now.duration_since(modified) > self.max_age {
            return Some(RotationReason::AgeExceeded);
        }

        None
    }
}

impl From<&RotationConfig> for RotationPolicy {
    fn from(config: &RotationConfig) -> Self {
        RotationPolicy::new(config.max_file_size, config.max_age_days)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_str("2024-08-10T00:00:00Z").unwrap()
    }

    #[test]
    fn test_size_wins_over_age() {
        let policy = RotationPolicy::new(100, 7);
        let stale = now() - SignedDuration::from_hours(30 * 24);
        assert_eq!(
            policy.check(100, stale, now()),
            Some(RotationReason::SizeExceeded)
        );
        assert_eq!(
            policy.check(101, now(), now()),
            Some(RotationReason::SizeExceeded)
        );
    }

    #[test]
    fn test_age_when_under_size() {
        let policy = RotationPolicy::new(100, 7);
        let stale = now() - SignedDuration::from_hours(7 * 24 + 1);
        assert_eq!(
            policy.check(99, stale, now()),
            Some(RotationReason::AgeExceeded)
        );
    }

    #[test]
    fn test_age_threshold_is_exclusive() {
        let policy = RotationPolicy::new(100, 7);
        let exactly = now() - SignedDuration::from_hours(7 * 24);
        assert_eq!(policy.check(0, exactly, now()), None);
        assert_eq!(policy.check(0, now(), now()), None);
    }

    #[test]
    fn test_modified_in_the_future_never_ages() {
        let policy = RotationPolicy::new(100, 1);
        let future = now() + SignedDuration::from_hours(48);
        assert_eq!(policy.check(0, future, now()), None);
    }

    #[test]
    fn test_policy_from_config() {
        let config = RotationConfig {
            max_file_size: 10,
            max_age_days: 1,
            ..RotationConfig::default()
        };
        assert_eq!(RotationPolicy::from(&config), RotationPolicy::new(10, 1));
        assert_eq!(config.file_path, PathBuf::from("access.log"));
        assert!(config.archive_on_rotate);
    }
}
