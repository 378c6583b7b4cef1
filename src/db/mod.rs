pub mod announcements;
pub mod memory;
pub mod teachers;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    announcement::{Announcement, AnnouncementChanges, NewAnnouncement},
    teacher::Teacher,
};

pub use announcements::PgAnnouncementStore;
pub use memory::MemoryStore;
pub use teachers::PgTeacherDirectory;

/// Persistence for announcements. Listings are ordered newest `created_at` first.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    async fn list_active(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Announcement>>;

    async fn list_all(&self) -> anyhow::Result<Vec<Announcement>>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Announcement>>;

    async fn insert(&self, new: NewAnnouncement) -> anyhow::Result<Announcement>;

    /// Overwrite the mutable fields of `id`. `None` when no such row exists.
    async fn replace(
        &self,
        id: Uuid,
        changes: AnnouncementChanges,
    ) -> anyhow::Result<Option<Announcement>>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn count_active(&self, now: DateTime<Utc>) -> anyhow::Result<i64>;

    async fn ping(&self) -> anyhow::Result<()>;
}

/// Lookup of teacher records by username.
#[async_trait]
pub trait TeacherDirectory: Send + Sync {
    async fn find_teacher(&self, username: &str) -> anyhow::Result<Option<Teacher>>;
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
