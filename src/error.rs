// Copyright 2026 Daniel Pelikan
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

//! Error types for the slider link.

use std::io;
use std::path::PathBuf;

use bluer::Address;
use thiserror::Error;

/// Errors raised while discovering, connecting to or driving the slider.
#[derive(Debug, Error)]
pub enum SliderError {
    /// BlueZ session, adapter or device operation failed.
    #[error("bluetooth error: {0}")]
    Bluetooth(#[from] bluer::Error),

    /// RFCOMM socket could not be opened.
    #[error("failed to connect to {address} on channel {channel}: {source}")]
    Connect {
        address: Address,
        channel: u8,
        #[source]
        source: io::Error,
    },

    /// Writing a payload to the open socket failed.
    #[error("failed to write to slider: {0}")]
    Write(#[source] io::Error),

    /// The command file could not be read.
    #[error("failed to read command file {}: {source}", path.display())]
    CommandFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The command file was empty, so there is no mode character to inspect.
    #[error("command file is empty")]
    EmptyCommand,
}

/// Result alias for slider operations.
pub type Result<T> = std::result::Result<T, SliderError>;
