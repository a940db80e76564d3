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

//! Discovery of the slider's HC-06 module.

use std::pin::Pin;
use std::time::Duration;

use bluer::{Adapter, AdapterEvent, Address, DiscoveryFilter, DiscoveryTransport};
use futures::{Stream, StreamExt};
use tracing::{debug, info, warn};

use super::constants::{NAME_POLL_INTERVAL_MS, SPP_UUID, TARGET_NAME};
use crate::config::DiscoverySettings;
use crate::error::Result;

/// Source of nearby devices.
#[allow(async_fn_in_trait)]
pub trait DeviceDiscovery {
    type Scan<'a>: ScanSession
    where
        Self: 'a;

    /// Start discovering. Discovery stays active until the session is dropped.
    async fn start_scan(&self, settings: &DiscoverySettings) -> Result<Self::Scan<'_>>;

    /// Report what is known about a matched device before connecting.
    async fn inspect(&self, _address: Address) -> Result<()> {
        Ok(())
    }
}

/// A running discovery.
#[allow(async_fn_in_trait)]
pub trait ScanSession {
    /// Wait out the scan window and return the devices seen, in discovery order.
    async fn candidates(&mut self, window: Duration) -> Result<Vec<Address>>;

    /// Look up the name of a device, giving up after `timeout`.
    ///
    /// Returns `Ok(None)` if no name became available in time.
    async fn resolve_name(&mut self, address: Address, timeout: Duration) -> Result<Option<String>>;
}

/// Scan once and return the first device named exactly [`TARGET_NAME`].
///
/// Names are resolved while discovery is still running. A lookup that fails
/// or times out only skips that candidate. Returns `Ok(None)` if no candidate
/// matched.
pub async fn find_target<D: DeviceDiscovery>(
    discovery: &D,
    settings: &DiscoverySettings,
) -> Result<Option<Address>> {
    info!(
        "Scanning for '{}' ({}s, flush cache: {})",
        TARGET_NAME,
        settings.duration.as_secs(),
        settings.flush_cache
    );

    let mut scan = discovery.start_scan(settings).await?;
    let candidates = scan.candidates(settings.duration).await?;
    info!("Discovered {} device(s)", candidates.len());

    for address in candidates {
        match scan.resolve_name(address, settings.name_timeout).await {
            Ok(Some(name)) if name == TARGET_NAME => {
                info!("Found {} at {}", TARGET_NAME, address);
                return Ok(Some(address));
            }
            Ok(Some(name)) => debug!("Skipping {} ({})", address, name),
            Ok(None) => debug!("No name for {} within timeout", address),
            Err(e) => warn!("Name lookup failed for {}: {}", address, e),
        }
    }

    Ok(None)
}

/// Devices reported by the running inquiry, in discovery order.
///
/// BlueZ replays its whole cache when discovery starts. Only devices with an
/// RSSI were actually heard by this inquiry.
#[derive(Debug, Default)]
struct Candidates {
    addresses: Vec<Address>,
}

impl Candidates {
    /// Record a device report. Returns true the first time a device is heard.
    fn offer(&mut self, address: Address, rssi: Option<i16>) -> bool {
        if rssi.is_none() || self.addresses.contains(&address) {
            return false;
        }
        self.addresses.push(address);
        true
    }

    fn into_addresses(self) -> Vec<Address> {
        self.addresses
    }
}

/// Whether a cached device should be removed before scanning.
fn should_flush(address: Address, paired: bluer::Result<bool>) -> bool {
    match paired {
        Ok(paired) => !paired,
        Err(e) => {
            warn!("Could not query cached device {}: {}", address, e);
            false
        }
    }
}

/// BlueZ-backed scanner using the default adapter.
pub struct BluezScanner {
    adapter: Adapter,
}

impl BluezScanner {
    /// Open a BlueZ session and prepare the default adapter.
    pub async fn new() -> Result<Self> {
        let session = bluer::Session::new().await?;
        debug!("BlueZ session created");

        let adapter = session.default_adapter().await?;
        info!("Using Bluetooth adapter: {}", adapter.name());

        // Ensure adapter is powered on
        if !adapter.is_powered().await? {
            info!("Powering on Bluetooth adapter...");
            adapter.set_powered(true).await?;
        }

        Ok(Self { adapter })
    }

    /// Forget unpaired devices so only devices in range are named.
    async fn flush_cache(&self) -> Result<()> {
        for address in self.adapter.device_addresses().await? {
            let device = self.adapter.device(address)?;
            if !should_flush(address, device.is_paired().await) {
                continue;
            }
            match self.adapter.remove_device(address).await {
                Ok(()) => debug!("Flushed cached device {}", address),
                Err(e) => warn!("Could not flush cached device {}: {}", address, e),
            }
        }
        Ok(())
    }
}

impl DeviceDiscovery for BluezScanner {
    type Scan<'a> = BluezScan<'a>;

    async fn start_scan(&self, settings: &DiscoverySettings) -> Result<BluezScan<'_>> {
        if settings.flush_cache {
            self.flush_cache().await?;
        }

        self.adapter
            .set_discovery_filter(DiscoveryFilter {
                transport: DiscoveryTransport::BrEdr,
                ..Default::default()
            })
            .await?;

        // Also reports devices again when their properties (RSSI, name) change.
        let events = self.adapter.discover_devices_with_changes().await?;

        Ok(BluezScan {
            adapter: &self.adapter,
            events: Box::pin(events),
            ended: false,
        })
    }

    async fn inspect(&self, address: Address) -> Result<()> {
        let device = self.adapter.device(address)?;

        if !device.is_paired().await? {
            warn!("{} is not paired; the connection may be refused", address);
        }

        match device.uuids().await? {
            Some(uuids) if !uuids.contains(&SPP_UUID) => {
                warn!("{} does not advertise the Serial Port Profile", address);
            }
            _ => {}
        }

        Ok(())
    }
}

/// Discovery on a BlueZ adapter. Dropping the event stream stops discovery.
pub struct BluezScan<'a> {
    adapter: &'a Adapter,
    events: Pin<Box<dyn Stream<Item = AdapterEvent> + 'a>>,
    ended: bool,
}

impl ScanSession for BluezScan<'_> {
    async fn candidates(&mut self, window: Duration) -> Result<Vec<Address>> {
        let deadline = tokio::time::sleep(window);
        tokio::pin!(deadline);

        let mut heard = Candidates::default();
        loop {
            tokio::select! {
                _ = &mut deadline => break,
                event = self.events.next() => match event {
                    Some(AdapterEvent::DeviceAdded(address)) => {
                        let rssi = match self.adapter.device(address)?.rssi().await {
                            Ok(rssi) => rssi,
                            Err(e) => {
                                debug!("No RSSI for {}: {}", address, e);
                                None
                            }
                        };
                        if heard.offer(address, rssi) {
                            debug!("Discovered {} (RSSI {:?})", address, rssi);
                        }
                    }
                    Some(_) => {}
                    None => {
                        self.ended = true;
                        break;
                    }
                },
            }
        }

        Ok(heard.into_addresses())
    }

    async fn resolve_name(&mut self, address: Address, timeout: Duration) -> Result<Option<String>> {
        let device = self.adapter.device(address)?;
        let poll = Duration::from_millis(NAME_POLL_INTERVAL_MS);
        let events = &mut self.events;
        let ended = &mut self.ended;

        // BlueZ requests remote names only while discovery is running, so the
        // event stream keeps being drained between polls.
        let lookup = async {
            loop {
                if let Some(name) = device.name().await? {
                    return Ok::<_, bluer::Error>(name);
                }
                if *ended {
                    tokio::time::sleep(poll).await;
                    continue;
                }
                tokio::select! {
                    event = events.next() => {
                        if event.is_none() {
                            *ended = true;
                        }
                    }
                    _ = tokio::time::sleep(poll) => {}
                }
            }
        };

        match tokio::time::timeout(timeout, lookup).await {
            Ok(result) => Ok(Some(result?)),
            Err(_) => Ok(None),
        }
    }
}
