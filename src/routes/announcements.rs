use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::ApiError,
    models::{
        announcement::{Announcement, AnnouncementParams},
        teacher::Teacher,
    },
    services::{announcements::AnnouncementService, metrics},
    AppState,
};

fn announcement_params(
    query: Result<Query<AnnouncementParams>, QueryRejection>,
) -> Result<AnnouncementParams, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /announcements/active: public, announcements inside their visibility window.
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let result = AnnouncementService::list_active(state.announcements.as_ref()).await;
    metrics::record("list_active", &result);
    result.map(Json)
}

/// GET /announcements/all?username=: every announcement, for the management view.
pub async fn list_all(
    State(state): State<AppState>,
    teacher: Teacher,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let result = AnnouncementService::list_all(state.announcements.as_ref(), &teacher).await;
    metrics::record("list_all", &result);
    result.map(Json)
}

/// POST /announcements/
pub async fn create_announcement(
    State(state): State<AppState>,
    teacher: Teacher,
    query: Result<Query<AnnouncementParams>, QueryRejection>,
) -> Result<(StatusCode, Json<Announcement>), ApiError> {
    let result = match announcement_params(query) {
        Ok(params) => {
            AnnouncementService::create(state.announcements.as_ref(), &teacher, &params).await
        }
        Err(e) => Err(e),
    };
    metrics::record("create", &result);
    result.map(|a| (StatusCode::CREATED, Json(a)))
}

/// PUT /announcements/{id}
pub async fn update_announcement(
    State(state): State<AppState>,
    teacher: Teacher,
    Path(id): Path<String>,
    query: Result<Query<AnnouncementParams>, QueryRejection>,
) -> Result<Json<Announcement>, ApiError> {
    let result = match announcement_params(query) {
        Ok(params) => {
            AnnouncementService::update(state.announcements.as_ref(), &teacher, &id, &params)
                .await
        }
        Err(e) => Err(e),
    };
    metrics::record("update", &result);
    result.map(Json)
}

/// DELETE /announcements/{id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    teacher: Teacher,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = AnnouncementService::delete(state.announcements.as_ref(), &teacher, &id).await;
    metrics::record("delete", &result);
    result.map(|_| Json(json!({ "message": "Announcement deleted successfully" })))
}
