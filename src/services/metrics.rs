use std::sync::Arc;

use chrono::Utc;
use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge, CounterVec, Gauge};
use tracing::{debug, warn};

use crate::{db::AnnouncementStore, error::ApiError};

lazy_static! {
    pub static ref ANNOUNCEMENT_OPERATIONS: CounterVec = register_counter_vec!(
        "announcement_operations_total",
        "Announcement requests by operation and outcome",
        &["operation", "outcome"]
    ).unwrap();

    pub static ref ACTIVE_ANNOUNCEMENTS: Gauge = register_gauge!(
        "announcements_active",
        "Announcements currently inside their visibility window"
    ).unwrap();
}

pub fn record<T>(operation: &str, result: &Result<T, ApiError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(ApiError::Unauthorized) => "unauthorized",
        Err(ApiError::BadRequest(_)) => "bad_request",
        Err(ApiError::NotFound(_)) => "not_found",
        Err(ApiError::Internal(_)) => "error",
    };
    ANNOUNCEMENT_OPERATIONS
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Spawn the background collector (refreshes every 5 minutes).
pub fn start(store: Arc<dyn AnnouncementStore>) {
    tokio::spawn(async move {
        loop {
            if let Err(e) = collect(store.as_ref()).await {
                warn!("Metrics: collection failed: {}", e);
            }
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
        }
    });
}

async fn collect(store: &dyn AnnouncementStore) -> anyhow::Result<()> {
    let active = store.count_active(Utc::now()).await?;
    ACTIVE_ANNOUNCEMENTS.set(active as f64);
    debug!("Metrics: {} active announcement(s)", active);
    Ok(())
}
