use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AuthorRow, PostRow};

/// Filter and pagination parameters for the published-posts feed.
///
/// `skip`/`take` absent means no OFFSET/LIMIT at all, not zero.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    pub search: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

impl FeedFilter {
    /// The effective search term. `None` and an empty string both mean
    /// "no content filter": the title/content OR-filter must be skipped
    /// entirely, never fed an empty pattern that would match everything.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDraft {
    pub title: String,
    pub content: Option<String>,
    /// When set, the draft is connected to the author with this email;
    /// creation fails if no such author exists.
    pub author_email: Option<String>,
}

/// Narrow contract over the backing data store.
///
/// Every method is a single atomic call; the store enforces the unique
/// email and author foreign-key invariants. Implemented by [`crate::PgStore`]
/// in production and by an in-memory store in the API test suite.
#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn list_authors(&self) -> Result<Vec<AuthorRow>>;

    async fn author_by_id(&self, id: i32) -> Result<Option<AuthorRow>>;

    async fn author_by_email(&self, email: &str) -> Result<Option<AuthorRow>>;

    async fn post_by_id(&self, id: i32) -> Result<Option<PostRow>>;

    /// Posts owned by an author, optionally restricted to (un)published ones.
    async fn posts_by_author(
        &self,
        author_id: i32,
        published: Option<bool>,
    ) -> Result<Vec<PostRow>>;

    /// Published posts, optionally substring-filtered and paginated.
    async fn feed(&self, filter: FeedFilter) -> Result<Vec<PostRow>>;

    /// Fails with `DuplicateEmail` if the email is already taken.
    async fn create_author(&self, author: NewAuthor) -> Result<AuthorRow>;

    /// Fails with `UnknownAuthorEmail` if `author_email` is set but does
    /// not resolve; no post is created in that case.
    async fn create_draft(&self, draft: NewDraft) -> Result<PostRow>;

    /// Atomically bumps the view counter by one. Fails with `NotFound`
    /// for an unknown id.
    async fn increment_view_count(&self, id: i32) -> Result<PostRow>;

    /// Deletes and returns the post. Fails with `NotFound` for an
    /// unknown id.
    async fn delete_post(&self, id: i32) -> Result<PostRow>;

    /// Cheap liveness round-trip for the health endpoint.
    async fn ping(&self) -> Result<()>;
}
