use std::sync::Arc;

use async_graphql::{Request, Response, Variables};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use api::gql::build_schema;
use api::gql::schema::ApiSchema;
use api::AppState;
use infra::error::Result;
use infra::models::{AuthorRow, PostRow};
use infra::{BlogStore, FeedFilter, NewAuthor, NewDraft, StoreError};

/// In-memory [`BlogStore`] with the same observable semantics as the
/// Postgres implementation: insertion-order listings, unique emails,
/// contains-style search, per-call atomicity via the mutex.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    authors: Vec<AuthorRow>,
    posts: Vec<PostRow>,
}

impl Inner {
    fn next_author_id(&self) -> i32 {
        self.authors.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    fn next_post_id(&self) -> i32 {
        self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

impl MemStore {
    #[allow(dead_code)]
    pub async fn insert_author(&self, email: &str, name: Option<&str>) -> AuthorRow {
        let mut inner = self.inner.lock().await;
        let row = AuthorRow {
            id: inner.next_author_id(),
            email: email.to_string(),
            name: name.map(String::from),
        };
        inner.authors.push(row.clone());
        row
    }

    #[allow(dead_code)]
    pub async fn insert_post(
        &self,
        title: &str,
        content: Option<&str>,
        published: bool,
        view_count: i32,
        author_id: Option<i32>,
    ) -> PostRow {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let row = PostRow {
            id: inner.next_post_id(),
            created_at: now,
            updated_at: now,
            title: title.to_string(),
            content: content.map(String::from),
            published,
            view_count,
            author_id,
        };
        inner.posts.push(row.clone());
        row
    }

    #[allow(dead_code)]
    pub async fn author_count(&self) -> usize {
        self.inner.lock().await.authors.len()
    }

    #[allow(dead_code)]
    pub async fn post_count(&self) -> usize {
        self.inner.lock().await.posts.len()
    }
}

#[async_trait]
impl BlogStore for MemStore {
    async fn list_authors(&self) -> Result<Vec<AuthorRow>> {
        Ok(self.inner.lock().await.authors.clone())
    }

    async fn author_by_id(&self, id: i32) -> Result<Option<AuthorRow>> {
        let inner = self.inner.lock().await;
        Ok(inner.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn author_by_email(&self, email: &str) -> Result<Option<AuthorRow>> {
        let inner = self.inner.lock().await;
        Ok(inner.authors.iter().find(|a| a.email == email).cloned())
    }

    async fn post_by_id(&self, id: i32) -> Result<Option<PostRow>> {
        let inner = self.inner.lock().await;
        Ok(inner.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn posts_by_author(
        &self,
        author_id: i32,
        published: Option<bool>,
    ) -> Result<Vec<PostRow>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .posts
            .iter()
            .filter(|p| p.author_id == Some(author_id))
            .filter(|p| published.is_none_or(|want| p.published == want))
            .cloned()
            .collect())
    }

    async fn feed(&self, filter: FeedFilter) -> Result<Vec<PostRow>> {
        let inner = self.inner.lock().await;
        let matches: Vec<PostRow> = inner
            .posts
            .iter()
            .filter(|p| p.published)
            .filter(|p| match filter.search_term() {
                Some(term) => {
                    p.title.contains(term)
                        || p.content.as_deref().is_some_and(|c| c.contains(term))
                }
                None => true,
            })
            .cloned()
            .collect();

        let skip = filter.skip.unwrap_or(0) as usize;
        let mut page: Vec<PostRow> = matches.into_iter().skip(skip).collect();
        if let Some(take) = filter.take {
            page.truncate(take as usize);
        }
        Ok(page)
    }

    async fn create_author(&self, author: NewAuthor) -> Result<AuthorRow> {
        let mut inner = self.inner.lock().await;
        if inner.authors.iter().any(|a| a.email == author.email) {
            return Err(StoreError::DuplicateEmail(author.email));
        }
        let row = AuthorRow {
            id: inner.next_author_id(),
            email: author.email,
            name: author.name,
        };
        inner.authors.push(row.clone());
        Ok(row)
    }

    async fn create_draft(&self, draft: NewDraft) -> Result<PostRow> {
        let mut inner = self.inner.lock().await;
        let author_id = match &draft.author_email {
            Some(email) => Some(
                inner
                    .authors
                    .iter()
                    .find(|a| &a.email == email)
                    .ok_or_else(|| StoreError::UnknownAuthorEmail(email.clone()))?
                    .id,
            ),
            None => None,
        };
        let now = Utc::now();
        let row = PostRow {
            id: inner.next_post_id(),
            created_at: now,
            updated_at: now,
            title: draft.title,
            content: draft.content,
            published: false,
            view_count: 0,
            author_id,
        };
        inner.posts.push(row.clone());
        Ok(row)
    }

    async fn increment_view_count(&self, id: i32) -> Result<PostRow> {
        let mut inner = self.inner.lock().await;
        let post = inner
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        post.view_count += 1;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i32) -> Result<PostRow> {
        let mut inner = self.inner.lock().await;
        let idx = inner
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(inner.posts.remove(idx))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Schema over a fresh in-memory store.
pub fn setup() -> (Arc<MemStore>, ApiSchema) {
    let store = Arc::new(MemStore::default());
    let schema = build_schema(AppState::with_store(store.clone()));
    (store, schema)
}

/// Helper function to execute GraphQL queries and mutations
pub async fn execute_graphql(
    schema: &ApiSchema,
    query: &str,
    variables: Option<Variables>,
) -> Response {
    let mut request = Request::new(query);
    if let Some(vars) = variables {
        request = request.variables(vars);
    }
    schema.execute(request).await
}
