use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub start_date: Option<DateTime<Utc>>,
    pub expiration_date: DateTime<Utc>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Announcement {
    /// Visible at `now`: not yet expired, and already started (or no start date).
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date >= now && self.start_date.map_or(true, |start| start <= now)
    }
}

/// Raw query-string input for create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncementParams {
    pub title: String,
    pub message: String,
    pub expiration_date: String,
    pub start_date: Option<String>,
}

/// Validated title, message and visibility window.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementDraft {
    pub title: String,
    pub message: String,
    pub start_date: Option<DateTime<Utc>>,
    pub expiration_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub draft: AnnouncementDraft,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AnnouncementChanges {
    pub draft: AnnouncementDraft,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn announcement(start: Option<DateTime<Utc>>, expires: DateTime<Utc>) -> Announcement {
        Announcement {
            id: Uuid::new_v4(),
            title: "Exam".into(),
            message: "Final exam Friday".into(),
            start_date: start,
            expiration_date: expires,
            created_by: "teacher1".into(),
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        }
    }

    #[test]
    fn active_window() {
        let now = Utc::now();
        let day = Duration::days(1);

        assert!(announcement(None, now + day).is_active_at(now));
        assert!(announcement(Some(now - day), now + day).is_active_at(now));
        assert!(!announcement(None, now - day).is_active_at(now));
        assert!(!announcement(Some(now + day), now + day * 2).is_active_at(now));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let now = Utc::now();
        assert!(announcement(Some(now), now).is_active_at(now));
    }

    #[test]
    fn serializes_null_start_and_hides_unset_update_stamps() {
        let a = announcement(None, Utc::now());
        let value = serde_json::to_value(&a).unwrap();
        assert!(value["start_date"].is_null());
        assert!(value.get("updated_by").is_none());
        assert!(value.get("updated_at").is_none());
        assert_eq!(value["id"], a.id.to_string());
    }
}
