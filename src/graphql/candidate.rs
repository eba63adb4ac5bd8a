use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::context::{loaders, pool};
use crate::error::ApiError;
use crate::models::Candidate;
use crate::repository;

#[derive(Default)]
pub struct CandidateQuery;

#[Object(rename_fields = "snake_case", rename_args = "snake_case")]
impl CandidateQuery {
    async fn candidate(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Candidate>> {
        loaders(ctx)?
            .candidate
            .load(id)
            .await
            .map_err(|err| ApiError::fetch("candidate", err).extend())
    }

    async fn candidates(&self, ctx: &Context<'_>) -> Result<Vec<Candidate>> {
        repository::find_all::<Candidate>(pool(ctx)?)
            .await
            .map_err(|err| ApiError::fetch("candidates", err).extend())
    }
}
