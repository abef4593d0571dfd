use anyhow::Result;
use colored::Colorize;

use super::utils;

pub async fn health() -> Result<()> {
    let client = utils::api_client()?;
    let health = client.health().await?;

    let status = if health.is_healthy() {
        health.status.green()
    } else {
        health.status.red()
    };
    println!("Backend status: {status}");
    if let Some(version) = &health.version {
        println!("Version: {version}");
    }
    println!("Active sessions: {}", health.active_sessions);
    Ok(())
}
