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

//! Fixed identity of the slider's Bluetooth module and discovery defaults.

use uuid::Uuid;

/// Name the HC-06 module reports over Bluetooth.
pub const TARGET_NAME: &str = "HC-06";

/// RFCOMM channel the HC-06 serves its serial port on.
pub const RFCOMM_CHANNEL: u8 = 1;

/// Standard SPP UUID.
pub const SPP_UUID: Uuid = Uuid::from_u128(0x00001101_0000_1000_8000_00805F9B34FB);

/// Default inquiry length in seconds.
pub const DEFAULT_DISCOVERY_SECS: u64 = 8;

/// Default upper bound for a single name lookup in seconds.
pub const DEFAULT_NAME_TIMEOUT_SECS: u64 = 10;

/// Poll interval while waiting for BlueZ to fill in a remote name.
pub const NAME_POLL_INTERVAL_MS: u64 = 250;
