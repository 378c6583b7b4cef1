use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AnnouncementStore, TeacherDirectory};
use crate::models::{
    announcement::{Announcement, AnnouncementChanges, NewAnnouncement},
    teacher::Teacher,
};

/// In-process announcement and teacher storage, for tests and `STORE=memory` runs.
#[derive(Default)]
pub struct MemoryStore {
    announcements: RwLock<Vec<Announcement>>,
    teachers: RwLock<HashMap<String, Teacher>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teachers<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let teachers = usernames
            .into_iter()
            .map(|name| {
                let username = name.into();
                let teacher = Teacher {
                    username: username.clone(),
                    display_name: None,
                };
                (username, teacher)
            })
            .collect();

        Self {
            announcements: RwLock::new(Vec::new()),
            teachers: RwLock::new(teachers),
        }
    }

    pub async fn len(&self) -> usize {
        self.announcements.read().await.len()
    }

    fn newest_first(mut rows: Vec<Announcement>) -> Vec<Announcement> {
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

#[async_trait]
impl AnnouncementStore for MemoryStore {
    async fn list_active(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Announcement>> {
        let rows = self
            .announcements
            .read()
            .await
            .iter()
            .filter(|a| a.is_active_at(now))
            .cloned()
            .collect();
        Ok(Self::newest_first(rows))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Announcement>> {
        let rows = self.announcements.read().await.clone();
        Ok(Self::newest_first(rows))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Announcement>> {
        Ok(self
            .announcements
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn insert(&self, new: NewAnnouncement) -> anyhow::Result<Announcement> {
        let announcement = Announcement {
            id: Uuid::new_v4(),
            title: new.draft.title,
            message: new.draft.message,
            start_date: new.draft.start_date,
            expiration_date: new.draft.expiration_date,
            created_by: new.created_by,
            created_at: new.created_at,
            updated_by: None,
            updated_at: None,
        };
        self.announcements.write().await.push(announcement.clone());
        Ok(announcement)
    }

    async fn replace(
        &self,
        id: Uuid,
        changes: AnnouncementChanges,
    ) -> anyhow::Result<Option<Announcement>> {
        let mut rows = self.announcements.write().await;
        let Some(existing) = rows.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        existing.title = changes.draft.title;
        existing.message = changes.draft.message;
        existing.start_date = changes.draft.start_date;
        existing.expiration_date = changes.draft.expiration_date;
        existing.updated_by = Some(changes.updated_by);
        existing.updated_at = Some(changes.updated_at);

        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.announcements.write().await;
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() < before)
    }

    async fn count_active(&self, now: DateTime<Utc>) -> anyhow::Result<i64> {
        let count = self
            .announcements
            .read()
            .await
            .iter()
            .filter(|a| a.is_active_at(now))
            .count();
        Ok(count as i64)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl TeacherDirectory for MemoryStore {
    async fn find_teacher(&self, username: &str) -> anyhow::Result<Option<Teacher>> {
        Ok(self.teachers.read().await.get(username).cloned())
    }
}
