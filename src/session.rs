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

//! One scan, connect and send pass.

use bluer::Address;
use tracing::{info, warn};

use crate::bluetooth::{
    find_target, CommandSink, Connector, DeviceDiscovery, RFCOMM_CHANNEL, TARGET_NAME,
};
use crate::command::{load_command, transmit, Command};
use crate::config::Config;
use crate::error::Result;

/// Printed when no HC-06 answered the scan.
pub const NOT_FOUND_MESSAGE: &str = "Could not find available Bluetooth device.";

/// Printed after the command was sent.
pub const PASSED_MESSAGE: &str = "Passed message";

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No device named [`TARGET_NAME`] was found. No socket was opened.
    NotFound,
    /// The command reached the slider's transport buffer.
    Passed { address: Address, sent: usize },
}

impl Outcome {
    /// User-facing notice for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::Passed { .. } => PASSED_MESSAGE,
        }
    }
}

/// Find the slider, then send it the command from the configured file.
///
/// The command is framed before the socket is opened, so an unreadable or
/// empty file never results in a connection. The link is closed on success
/// and dropped (which closes it) on any error.
pub async fn run<D, C>(config: &Config, discovery: &D, connector: &C) -> Result<Outcome>
where
    D: DeviceDiscovery,
    C: Connector,
{
    let settings = config.discovery.settings();

    let Some(address) = find_target(discovery, &settings).await? else {
        info!("No {} in range", TARGET_NAME);
        return Ok(Outcome::NotFound);
    };

    if let Err(e) = discovery.inspect(address).await {
        warn!("Could not inspect {}: {}", address, e);
    }

    let buffer = load_command(&config.command.path).await?;
    let command = Command::parse(&buffer)?;

    let mut link = connector.connect(address, RFCOMM_CHANNEL).await?;
    let sent = transmit(&mut link, &command).await?;
    link.close().await?;

    Ok(Outcome::Passed { address, sent })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            Outcome::NotFound.message(),
            "Could not find available Bluetooth device."
        );

        let passed = Outcome::Passed {
            address: Address::any(),
            sent: 1,
        };
        assert_eq!(passed.message(), "Passed message");
    }
}
