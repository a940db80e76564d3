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

//! RFCOMM link to the slider.

use bluer::rfcomm::{SocketAddr, Stream};
use bluer::Address;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{Result, SliderError};

/// Opens links to a remote device.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Link: CommandSink;

    /// Open a stream connection to `address` on `channel`.
    async fn connect(&self, address: Address, channel: u8) -> Result<Self::Link>;
}

/// Byte sink on an open link.
///
/// Dropping a sink releases the underlying connection.
#[allow(async_fn_in_trait)]
pub trait CommandSink {
    /// Write one payload, waiting until the local transport accepts it.
    async fn send(&mut self, payload: &[u8]) -> Result<()>;

    /// Shut the link down.
    async fn close(self) -> Result<()>;
}

/// Connector for Bluetooth serial modules.
#[derive(Debug, Default, Clone, Copy)]
pub struct RfcommConnector;

impl Connector for RfcommConnector {
    type Link = RfcommLink;

    async fn connect(&self, address: Address, channel: u8) -> Result<RfcommLink> {
        info!("Connecting to {} on RFCOMM channel {}", address, channel);

        let stream = Stream::connect(SocketAddr::new(address, channel))
            .await
            .map_err(|source| SliderError::Connect {
                address,
                channel,
                source,
            })?;

        info!("Connected to {}", address);
        Ok(RfcommLink { stream, address })
    }
}

/// An open RFCOMM connection. The socket closes when this is dropped.
pub struct RfcommLink {
    stream: Stream,
    address: Address,
}

impl CommandSink for RfcommLink {
    async fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.stream
            .write_all(payload)
            .await
            .map_err(SliderError::Write)?;
        self.stream.flush().await.map_err(SliderError::Write)
    }

    async fn close(mut self) -> Result<()> {
        self.stream.shutdown().await.map_err(SliderError::Write)?;
        debug!("Closed link to {}", self.address);
        Ok(())
    }
}
