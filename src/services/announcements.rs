use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::{AnnouncementStore, TeacherDirectory},
    error::ApiError,
    models::{
        announcement::{
            Announcement, AnnouncementChanges, AnnouncementDraft, AnnouncementParams,
            NewAnnouncement,
        },
        teacher::Teacher,
    },
    services::timestamp::{parse_optional_timestamp, parse_timestamp},
};

pub struct AnnouncementService;

impl AnnouncementService {
    /// Resolve `username` to a teacher record, or fail with `Unauthorized`.
    pub async fn authorize(
        teachers: &dyn TeacherDirectory,
        username: Option<&str>,
    ) -> Result<Teacher, ApiError> {
        let username = username
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ApiError::Unauthorized)?;

        teachers
            .find_teacher(username)
            .await?
            .ok_or(ApiError::Unauthorized)
    }

    pub async fn list_active(store: &dyn AnnouncementStore) -> Result<Vec<Announcement>, ApiError> {
        Ok(store.list_active(Utc::now()).await?)
    }

    pub async fn list_all(
        store: &dyn AnnouncementStore,
        _teacher: &Teacher,
    ) -> Result<Vec<Announcement>, ApiError> {
        Ok(store.list_all().await?)
    }

    pub async fn create(
        store: &dyn AnnouncementStore,
        teacher: &Teacher,
        params: &AnnouncementParams,
    ) -> Result<Announcement, ApiError> {
        let draft = validate(params)?;

        let announcement = store
            .insert(NewAnnouncement {
                draft,
                created_by: teacher.username.clone(),
                created_at: Utc::now(),
            })
            .await?;

        info!(id = %announcement.id, created_by = %teacher.username, "Announcement created");
        Ok(announcement)
    }

    /// Replace title, message and dates. Malformed and unknown ids are both `NotFound`.
    pub async fn update(
        store: &dyn AnnouncementStore,
        teacher: &Teacher,
        id: &str,
        params: &AnnouncementParams,
    ) -> Result<Announcement, ApiError> {
        let id = parse_id(id)?;
        if store.get(id).await?.is_none() {
            return Err(ApiError::announcement_not_found());
        }
        let draft = validate(params)?;

        let announcement = store
            .replace(
                id,
                AnnouncementChanges {
                    draft,
                    updated_by: teacher.username.clone(),
                    updated_at: Utc::now(),
                },
            )
            .await?
            .ok_or_else(ApiError::announcement_not_found)?;

        info!(id = %id, updated_by = %teacher.username, "Announcement updated");
        Ok(announcement)
    }

    pub async fn delete(
        store: &dyn AnnouncementStore,
        teacher: &Teacher,
        id: &str,
    ) -> Result<(), ApiError> {
        let id = parse_id(id)?;

        if !store.delete(id).await? {
            return Err(ApiError::announcement_not_found());
        }

        info!(id = %id, deleted_by = %teacher.username, "Announcement deleted");
        Ok(())
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::announcement_not_found())
}

fn validate(params: &AnnouncementParams) -> Result<AnnouncementDraft, ApiError> {
    let expiration_date = parse_timestamp(&params.expiration_date)
        .map_err(|_| ApiError::BadRequest("Invalid expiration date format".into()))?;
    let start_date = parse_optional_timestamp(params.start_date.as_deref())
        .map_err(|_| ApiError::BadRequest("Invalid start date format".into()))?;

    Ok(AnnouncementDraft {
        title: params.title.clone(),
        message: params.message.clone(),
        start_date,
        expiration_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::{DateTime, Duration};

    fn teacher(name: &str) -> Teacher {
        Teacher {
            username: name.into(),
            display_name: None,
        }
    }

    fn params(expires: &str, start: Option<&str>) -> AnnouncementParams {
        AnnouncementParams {
            title: "Exam".into(),
            message: "Final exam Friday".into(),
            expiration_date: expires.into(),
            start_date: start.map(Into::into),
        }
    }

    async fn seed(
        store: &MemoryStore,
        title: &str,
        start: Option<DateTime<Utc>>,
        expires: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Announcement {
        store
            .insert(NewAnnouncement {
                draft: AnnouncementDraft {
                    title: title.into(),
                    message: format!("{title} message"),
                    start_date: start,
                    expiration_date: expires,
                },
                created_by: "teacher1".into(),
                created_at,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn authorize_requires_known_teacher() {
        let store = MemoryStore::with_teachers(["teacher1"]);

        let found = AnnouncementService::authorize(&store, Some("teacher1")).await.unwrap();
        assert_eq!(found.username, "teacher1");

        for username in [Some("stranger"), Some(""), None] {
            let err = AnnouncementService::authorize(&store, username).await.unwrap_err();
            assert!(matches!(err, ApiError::Unauthorized));
        }
    }

    #[tokio::test]
    async fn list_active_filters_window_newest_first() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let day = Duration::days(1);

        let older = seed(&store, "older", None, now + day, now - day * 3).await;
        seed(&store, "expired", None, now - day, now - day * 2).await;
        seed(&store, "future", Some(now + day), now + day * 5, now - day).await;
        let newer = seed(&store, "newer", Some(now - day), now + day, now).await;

        let active = AnnouncementService::list_active(&store).await.unwrap();
        let ids: Vec<Uuid> = active.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn list_all_is_unfiltered_newest_first() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let day = Duration::days(1);

        seed(&store, "b", None, now - day, now - day).await;
        seed(&store, "c", None, now + day, now).await;
        seed(&store, "a", Some(now + day), now + day, now - day * 2).await;

        let all = AnnouncementService::list_all(&store, &teacher("teacher1")).await.unwrap();
        let titles: Vec<&str> = all.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn create_stamps_creator() {
        let store = MemoryStore::new();
        let created = AnnouncementService::create(
            &store,
            &teacher("teacher1"),
            &params("2099-01-01T00:00:00Z", None),
        )
        .await
        .unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(created.created_by, "teacher1");
        assert_eq!(created.start_date, None);
        assert_eq!(created.updated_by, None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn create_rejects_bad_dates_without_persisting() {
        let store = MemoryStore::new();

        let err = AnnouncementService::create(&store, &teacher("t"), &params("not-a-date", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid expiration date format"));

        let err = AnnouncementService::create(
            &store,
            &teacher("t"),
            &params("2099-01-01", Some("yesterday")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid start date format"));

        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_stamps_editor() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let original = seed(&store, "draft", Some(now), now + Duration::days(1), now).await;

        let mut changes = params("2099-06-01T12:00:00+02:00", None);
        changes.title = "Exam moved".into();
        let updated = AnnouncementService::update(
            &store,
            &teacher("teacher2"),
            &original.id.to_string(),
            &changes,
        )
        .await
        .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "Exam moved");
        assert_eq!(updated.start_date, None);
        assert_eq!(updated.expiration_date, parse_timestamp("2099-06-01T10:00:00Z").unwrap());
        assert_eq!(updated.created_by, "teacher1");
        assert_eq!(updated.updated_by.as_deref(), Some("teacher2"));
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_with_malformed_id_changes_nothing() {
        let store = MemoryStore::new();
        let now = Utc::now();
        seed(&store, "keep", None, now + Duration::days(1), now).await;
        let before = store.list_all().await.unwrap();

        let err = AnnouncementService::update(
            &store,
            &teacher("teacher1"),
            "not-an-id",
            &params("2099-01-01", None),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        assert_eq!(store.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = AnnouncementService::update(
            &store,
            &teacher("teacher1"),
            &Uuid::new_v4().to_string(),
            &params("2099-01-01", None),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_checks_existence_before_dates() {
        let store = MemoryStore::new();
        let err = AnnouncementService::update(
            &store,
            &teacher("teacher1"),
            &Uuid::new_v4().to_string(),
            &params("not-a-date", None),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_existing_with_bad_date_is_bad_request() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let original = seed(&store, "keep", None, now + Duration::days(1), now).await;

        let err = AnnouncementService::update(
            &store,
            &teacher("teacher1"),
            &original.id.to_string(),
            &params("not-a-date", None),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid expiration date format"));
        assert_eq!(store.get(original.id).await.unwrap(), Some(original));
    }

    #[tokio::test]
    async fn delete_removes_once() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let target = seed(&store, "gone", None, now, now).await;
        seed(&store, "stays", None, now, now).await;
        let id = target.id.to_string();

        AnnouncementService::delete(&store, &teacher("teacher1"), &id).await.unwrap();
        assert_eq!(store.len().await, 1);

        let err = AnnouncementService::delete(&store, &teacher("teacher1"), &id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn delete_with_malformed_id_is_not_found() {
        let store = MemoryStore::new();
        let err = AnnouncementService::delete(&store, &teacher("teacher1"), "12345")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
