use async_trait::async_trait;

use crate::db::Db;
use crate::error::{Result, StoreError};
use crate::models::{AuthorRow, PostRow};
use crate::store::{BlogStore, FeedFilter, NewAuthor, NewDraft};

const AUTHOR_COLUMNS: &str = "id, email, name";
const POST_COLUMNS: &str =
    "id, created_at, updated_at, title, content, published, view_count, author_id";

/// PostgreSQL-backed [`BlogStore`].
///
/// Each method issues a single statement; atomicity per call comes from
/// the database. The pool handle is cheap to clone and safe to share
/// across concurrent requests.
#[derive(Clone)]
pub struct PgStore {
    db: Db,
}

impl PgStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn list_authors(&self) -> Result<Vec<AuthorRow>> {
        let rows = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY id"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn author_by_id(&self, id: i32) -> Result<Option<AuthorRow>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn author_by_email(&self, email: &str) -> Result<Option<AuthorRow>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn post_by_id(&self, id: i32) -> Result<Option<PostRow>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn posts_by_author(
        &self,
        author_id: i32,
        published: Option<bool>,
    ) -> Result<Vec<PostRow>> {
        let mut query = sqlx::QueryBuilder::new(format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = "
        ));
        query.push_bind(author_id);

        if let Some(published) = published {
            query.push(" AND published = ");
            query.push_bind(published);
        }

        query.push(" ORDER BY id");

        let rows = query.build_query_as::<PostRow>().fetch_all(&self.db).await?;

        Ok(rows)
    }

    async fn feed(&self, filter: FeedFilter) -> Result<Vec<PostRow>> {
        let mut query = sqlx::QueryBuilder::new(format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE published = TRUE"
        ));

        // No search term means no content filter at all; an empty LIKE
        // pattern would silently match every row.
        if let Some(term) = filter.search_term() {
            let pattern = format!("%{term}%");
            query.push(" AND (title LIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR content LIKE ");
            query.push_bind(pattern);
            query.push(")");
        }

        query.push(" ORDER BY id");

        if let Some(take) = filter.take {
            query.push(" LIMIT ");
            query.push_bind(take);
        }
        if let Some(skip) = filter.skip {
            query.push(" OFFSET ");
            query.push_bind(skip);
        }

        let rows = query.build_query_as::<PostRow>().fetch_all(&self.db).await?;

        Ok(rows)
    }

    async fn create_author(&self, author: NewAuthor) -> Result<AuthorRow> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "INSERT INTO authors (email, name) VALUES ($1, $2) RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(&author.email)
        .bind(&author.name)
        .fetch_one(&self.db)
        .await
        .map_err(|e| StoreError::from_author_insert(e, &author.email))?;

        Ok(row)
    }

    async fn create_draft(&self, draft: NewDraft) -> Result<PostRow> {
        // Resolve the connect target first so a bad email creates nothing.
        let author_id = match &draft.author_email {
            Some(email) => Some(
                self.author_by_email(email)
                    .await?
                    .ok_or_else(|| StoreError::UnknownAuthorEmail(email.clone()))?
                    .id,
            ),
            None => None,
        };

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(author_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    async fn increment_view_count(&self, id: i32) -> Result<PostRow> {
        // Single statement, so concurrent increments never lose updates.
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE posts SET view_count = view_count + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.ok_or(StoreError::NotFound)
    }

    async fn delete_post(&self, id: i32) -> Result<PostRow> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "DELETE FROM posts WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<()> {
        let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.db).await?;
        Ok(())
    }
}
