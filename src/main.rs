use anyhow::Context;
use std::sync::Arc;
use ticketsla::config::Config;
use ticketsla::infrastructure::{
    observability, persistence::Database, runtime::SystemClock,
};
use ticketsla::SlaService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    observability::init_tracing(&config)
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing: {}", e))?;
    tracing::info!("Configuration loaded");

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    db.run_migrations()
        .await
        .context("failed to apply database schema")?;

    let db = Arc::new(db);
    let sla_service = SlaService::new(
        db.clone(),
        db.clone(),
        Arc::new(SystemClock::new()),
        config.resolved_status.clone(),
    );

    let report = sla_service.active_ticket_report().await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
