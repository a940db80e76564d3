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

//! Bluetooth communication module.
//!
//! Finds the slider's HC-06 module and opens an RFCOMM link to it.

mod connection;
pub mod constants;
mod scanner;

pub use connection::{CommandSink, Connector, RfcommConnector, RfcommLink};
pub use constants::{RFCOMM_CHANNEL, TARGET_NAME};
pub use scanner::{find_target, BluezScan, BluezScanner, DeviceDiscovery, ScanSession};
