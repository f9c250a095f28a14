use async_graphql::{Context, Object, Result};

use crate::gql::error::GqlError;
use crate::gql::types::{Author, Post};
use crate::state::AppState;
use infra::FeedFilter;

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All authors, in store-default order.
    async fn all_authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let state = ctx.data::<AppState>()?;
        let rows = state.store().list_authors().await.map_err(GqlError::from)?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    /// A single post by primary key; null when absent.
    async fn post_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Post>> {
        let state = ctx.data::<AppState>()?;
        let row = state.store().post_by_id(id).await.map_err(GqlError::from)?;
        Ok(row.map(Post::from))
    }

    /// Published posts, optionally filtered to those whose title or content
    /// contains `searchString`, optionally paginated with `skip`/`take`.
    /// Absent `skip`/`take` means no offset/limit, not zero.
    async fn feed(
        &self,
        ctx: &Context<'_>,
        search_string: Option<String>,
        skip: Option<i32>,
        take: Option<i32>,
    ) -> Result<Vec<Post>> {
        if skip.is_some_and(|s| s < 0) {
            return Err(GqlError::new("skip must be non-negative").into());
        }
        if take.is_some_and(|t| t < 0) {
            return Err(GqlError::new("take must be non-negative").into());
        }

        let state = ctx.data::<AppState>()?;
        let filter = FeedFilter {
            search: search_string,
            skip: skip.map(i64::from),
            take: take.map(i64::from),
        };
        let rows = state.store().feed(filter).await.map_err(GqlError::from)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Unpublished posts owned by the given author.
    async fn drafts_by_author(&self, ctx: &Context<'_>, id: i32) -> Result<Vec<Post>> {
        let state = ctx.data::<AppState>()?;
        let rows = state
            .store()
            .posts_by_author(id, Some(false))
            .await
            .map_err(GqlError::from)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }
}
