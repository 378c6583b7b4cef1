pub mod announcements;
pub mod health;
pub mod metrics;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        // Announcements
        .route("/announcements/active", get(announcements::list_active))
        .route("/announcements/all", get(announcements::list_all))
        .route("/announcements", post(announcements::create_announcement))
        .route("/announcements/", post(announcements::create_announcement))
        .route(
            "/announcements/{id}",
            put(announcements::update_announcement).delete(announcements::delete_announcement),
        )
        .with_state(state)
}
