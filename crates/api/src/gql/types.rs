use async_graphql::{ComplexObject, Context, Result, SimpleObject};
use chrono::{DateTime, Utc};

use crate::gql::error::GqlError;
use crate::state::AppState;
use infra::models::{AuthorRow, PostRow};

#[derive(SimpleObject, Debug, Clone)]
#[graphql(complex)]
pub struct Author {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
}

#[ComplexObject]
impl Author {
    /// All posts owned by this author, drafts included. Empty list for an
    /// author without posts.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let state = ctx.data::<AppState>()?;
        let rows = state
            .store()
            .posts_by_author(self.id, None)
            .await
            .map_err(GqlError::from)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(complex)]
pub struct Post {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub view_count: i32,
    #[graphql(skip)]
    pub author_id: Option<i32>,
}

#[ComplexObject]
impl Post {
    /// The owning author, or null for a post without one. Resolved lazily
    /// from the stored author id.
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Author>> {
        let Some(author_id) = self.author_id else {
            return Ok(None);
        };
        let state = ctx.data::<AppState>()?;
        let row = state
            .store()
            .author_by_id(author_id)
            .await
            .map_err(GqlError::from)?;
        Ok(row.map(Author::from))
    }
}

impl From<AuthorRow> for Author {
    fn from(r: AuthorRow) -> Self {
        Author {
            id: r.id,
            email: r.email,
            name: r.name,
        }
    }
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post {
            id: r.id,
            created_at: r.created_at,
            updated_at: r.updated_at,
            title: r.title,
            content: r.content,
            published: r.published,
            view_count: r.view_count,
            author_id: r.author_id,
        }
    }
}
