use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A teacher record resolved from the directory. Holding one is what
/// authorizes the management operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub username: String,
    pub display_name: Option<String>,
}

/// `?username=` as sent by the front-end on every authenticated call.
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}
