use async_trait::async_trait;
use sqlx::PgPool;

use super::TeacherDirectory;
use crate::models::teacher::Teacher;

#[derive(Clone)]
pub struct PgTeacherDirectory {
    pool: PgPool,
}

impl PgTeacherDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or rename a teacher. Used by the seed binary.
    pub async fn upsert(&self, username: &str, display_name: Option<&str>) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO teachers (username, display_name) VALUES ($1, $2)
             ON CONFLICT (username) DO UPDATE SET display_name = EXCLUDED.display_name",
        )
        .bind(username)
        .bind(display_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TeacherDirectory for PgTeacherDirectory {
    async fn find_teacher(&self, username: &str) -> anyhow::Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT username, display_name FROM teachers WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }
}
