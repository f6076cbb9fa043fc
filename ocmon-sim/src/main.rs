//! ocmon-sim - Synthetic sensor producer
//!
//! Posts one random-walk reading per tick to the monitoring service:
//! depth wanders within bounds, surface velocity follows depth, sediment
//! follows velocity, and floating objects appear in occasional bursts.
//! Connection failures are logged and the next tick retries; retry policy
//! beyond that belongs here, not in the service.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for ocmon-sim
#[derive(Parser, Debug)]
#[command(name = "ocmon-sim")]
#[command(about = "Synthetic reading producer for ocmon-server")]
#[command(version)]
struct Args {
    /// Ingest endpoint URL
    #[arg(long, default_value = "http://127.0.0.1:8000/ingest", env = "OCMON_SIM_URL")]
    url: String,

    /// Seconds between readings
    #[arg(long, default_value = "1.0", env = "OCMON_SIM_INTERVAL")]
    interval: f64,

    /// Channel width reported with each reading (m)
    #[arg(long, default_value = "5.0")]
    channel_width: f64,
}

/// Wire form of one reading, matching the service's ingest contract
#[derive(Debug, Serialize)]
struct SensorPayload {
    depth: f64,
    velocity_surf: f64,
    voltage: f64,
    channel_width: f64,
    sediment: f64,
    floating_count: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ocmon_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let client = reqwest::Client::new();

    info!(
        "ocmon-sim v{} posting to {} every {}s",
        env!("CARGO_PKG_VERSION"),
        args.url,
        args.interval
    );

    let mut depth: f64 = 2.0;
    let mut ticker = tokio::time::interval(Duration::from_secs_f64(args.interval));

    loop {
        ticker.tick().await;

        let payload = next_reading(&mut depth, args.channel_width);

        match client.post(&args.url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                info!(
                    depth = payload.depth,
                    sediment = payload.sediment,
                    floating = payload.floating_count,
                    "reading sent"
                );
            }
            Ok(response) => {
                warn!(status = %response.status(), "service rejected reading");
            }
            Err(e) => {
                warn!("failed to reach service: {}", e);
            }
        }
    }
}

/// Advance the random walk and build the next payload.
fn next_reading(depth: &mut f64, channel_width: f64) -> SensorPayload {
    let mut rng = rand::thread_rng();

    *depth += rng.gen_range(-0.05..0.05);
    if *depth < 0.5 {
        *depth = 0.5;
    }

    // Faster water where the channel is shallower
    let velocity = 4.0 / *depth + rng.gen_range(-0.1..0.1);

    // Sediment load rises with velocity
    let sediment = velocity * 0.5 + rng.gen_range(0.0..0.2);

    // Occasional burst of floating debris
    let floating_count = if rng.gen::<f64>() > 0.8 {
        rng.gen_range(1..=6)
    } else {
        0
    };

    SensorPayload {
        depth: round(*depth, 3),
        velocity_surf: round(velocity, 3),
        voltage: 12.0,
        channel_width,
        sediment: round(sediment, 2),
        floating_count,
    }
}

fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
