use async_graphql::{Context, Object, Result};

use crate::gql::error::GqlError;
use crate::gql::types::{Author, Post};
use crate::state::AppState;
use infra::{NewAuthor, NewDraft};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new author. Fails with a field-level error if the email is
    /// already taken; no record is created in that case.
    async fn signup_author(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        email: String,
    ) -> Result<Author> {
        let state = ctx.data::<AppState>()?;
        let row = state
            .store()
            .create_author(NewAuthor { email, name })
            .await
            .map_err(GqlError::from)?;
        Ok(row.into())
    }

    /// Create an unpublished post. When `authorEmail` is given it must
    /// resolve to an existing author, otherwise the mutation fails and no
    /// post is created.
    async fn create_draft(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: Option<String>,
        author_email: Option<String>,
    ) -> Result<Option<Post>> {
        let state = ctx.data::<AppState>()?;
        let row = state
            .store()
            .create_draft(NewDraft {
                title,
                content,
                author_email,
            })
            .await
            .map_err(GqlError::from)?;
        Ok(Some(row.into()))
    }

    /// Atomically bump a post's view counter by one and return the updated
    /// post. Unknown ids surface as a field-level not-found error.
    async fn increment_post_view_count(
        &self,
        ctx: &Context<'_>,
        id: i32,
    ) -> Result<Option<Post>> {
        let state = ctx.data::<AppState>()?;
        let row = state
            .store()
            .increment_view_count(id)
            .await
            .map_err(GqlError::from)?;
        Ok(Some(row.into()))
    }

    /// Delete a post and return it. Unknown ids surface as a field-level
    /// not-found error; the author, if any, is untouched.
    async fn delete_post(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Post>> {
        let state = ctx.data::<AppState>()?;
        let row = state
            .store()
            .delete_post(id)
            .await
            .map_err(GqlError::from)?;
        Ok(Some(row.into()))
    }
}
