use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::{
    error::ApiError,
    models::teacher::{Teacher, UsernameQuery},
    services::{announcements::AnnouncementService, metrics},
    AppState,
};

/// Resolves the `username` query parameter against the teacher directory.
/// Rejects with 401 when it is missing or unknown.
impl FromRequestParts<AppState> for Teacher {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let username = Query::<UsernameQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.username);

        let result =
            AnnouncementService::authorize(state.teachers.as_ref(), username.as_deref()).await;
        metrics::record("authorize", &result);
        result
    }
}
