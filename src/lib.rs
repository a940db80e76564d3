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

//! Bluetooth slider link library.
//!
//! Finds an HC-06 serial module, opens an RFCOMM link and streams a
//! stepper-motor command read from a file.

pub mod bluetooth;
pub mod command;
pub mod config;
pub mod error;
pub mod session;

pub use error::{Result, SliderError};
pub use session::{run, Outcome};
