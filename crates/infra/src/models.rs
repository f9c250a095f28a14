use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AuthorRow {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PostRow {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub view_count: i32,
    pub author_id: Option<i32>,
}

impl PostRow {
    /// A draft is a post that has not been published yet.
    pub fn is_draft(&self) -> bool {
        !self.published
    }
}
