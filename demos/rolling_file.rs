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

//! An example of logging to the console and a small rotating file.

use rotalog::Logger;
use rotalog::StreamMode;
use rotalog::record::Level;

fn main() {
    let mut logger = Logger::new();
    logger.set_stream(StreamMode::Both);
    logger.set_level(Level::Trace);
    logger.set_file_path("logs/my_app.log");
    logger.set_max_file_size(1024);

    for i in 0..20 {
        rotalog::critical!(logger, "Hello critical {i}!").unwrap();
        rotalog::error!(logger, "Hello error {i}!").unwrap();
        rotalog::warn!(logger, "Hello warn {i}!").unwrap();
        rotalog::info!(logger, "Hello info {i}!").unwrap();
        rotalog::debug!(logger, "Hello debug {i}!").unwrap();
        rotalog::trace!(logger, "Hello trace {i}!").unwrap();
    }

    // from here on, records of the log crate go through the same logger
    rotalog::bridge::setup_log_crate(logger);
    log::info!("Hello from the log crate!");
}
