//! NATS message handlers

pub mod ping;
pub mod slots;

use std::sync::Arc;

use anyhow::Result;
use async_nats::Client;
use sqlx::PgPool;
use tokio::select;
use tracing::{error, info};

use crate::config::Config;
use crate::db::store::{PgSchedulingStore, SchedulingStore};

/// Start all message handlers
pub async fn start_handlers(client: Client, pool: PgPool, config: &Config) -> Result<()> {
    info!("Starting message handlers...");

    let store: Arc<dyn SchedulingStore> = Arc::new(PgSchedulingStore::new(pool));

    // Subscribe to all subjects
    let ping_sub = client.subscribe("prs.ping").await?;
    let slots_suggest_sub = client.subscribe("prs.slots.suggest").await?;

    info!("Subscribed to NATS subjects");

    // Clone for each handler
    let client_ping = client.clone();
    let client_slots_suggest = client.clone();
    let store_slots_suggest = Arc::clone(&store);
    let analysis_window_weeks = config.analysis_window_weeks;

    // Spawn handlers
    let ping_handle = tokio::spawn(async move {
        ping::handle_ping(client_ping, ping_sub).await
    });

    let slots_suggest_handle = tokio::spawn(async move {
        slots::handle_suggest(
            client_slots_suggest,
            slots_suggest_sub,
            store_slots_suggest,
            analysis_window_weeks,
        )
        .await
    });

    // Run until any handler exits
    select! {
        result = ping_handle => {
            if let Err(e) = result? {
                error!("Ping handler error: {}", e);
            }
        }
        result = slots_suggest_handle => {
            if let Err(e) = result? {
                error!("Slots suggest handler error: {}", e);
            }
        }
    }

    Ok(())
}
