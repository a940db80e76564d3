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

//! Bluetooth slider link: sends a stepper-motor command to an HC-06 module.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bluetooth_slider::bluetooth::{BluezScanner, RfcommConnector};
use bluetooth_slider::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the outcome notice.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bluetooth_slider=info".parse()?),
        )
        .init();

    info!("Starting bluetooth-slider v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!("Command file: {}", config.command.path.display());

    let scanner = BluezScanner::new().await?;
    let outcome = bluetooth_slider::run(&config, &scanner, &RfcommConnector).await?;

    println!("{}", outcome.message());
    Ok(())
}
