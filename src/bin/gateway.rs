//! One-shot serverless entry point.
//!
//! Reads a single API Gateway event as JSON from stdin, runs it through the
//! router and writes the response envelope to stdout.
//!
//! Every invocation builds a fresh store, so nothing carries over between
//! events: a book created by one invocation is not visible to the next.

use std::io::Read;

use anyhow::Context;
use library_api::{
    api,
    config::AppConfig,
    gateway::{self, GatewayEvent},
    init_tracing, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read event from stdin")?;
    let event: GatewayEvent = serde_json::from_str(&raw).context("stdin is not a gateway event")?;

    let router = api::router(AppState::new(config));
    let response = gateway::dispatch(router, &event).await?;

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
