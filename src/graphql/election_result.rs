use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result};

use super::context::{loaders, pool};
use crate::error::ApiError;
use crate::models::{ElectionCandidate, ElectionResult};
use crate::repository;

#[derive(Default)]
pub struct ElectionResultQuery;

#[Object(rename_fields = "snake_case", rename_args = "snake_case")]
impl ElectionResultQuery {
    async fn election_result(&self, ctx: &Context<'_>, id: i32) -> Result<Option<ElectionResult>> {
        repository::find_by_id::<ElectionResult>(pool(ctx)?, id)
            .await
            .map_err(|err| ApiError::fetch("election result", err).extend())
    }

    async fn election_results(&self, ctx: &Context<'_>) -> Result<Vec<ElectionResult>> {
        repository::find_all::<ElectionResult>(pool(ctx)?)
            .await
            .map_err(|err| ApiError::fetch("election results", err).extend())
    }

    /// Results of one constituency for one election year, ordered by rank.
    async fn constituency_results(
        &self,
        ctx: &Context<'_>,
        constituency_id: i32,
        election_year: i32,
    ) -> Result<Vec<ElectionResult>> {
        repository::constituency_results(pool(ctx)?, constituency_id, election_year)
            .await
            .map_err(|err| ApiError::fetch("constituency results", err).extend())
    }
}

#[ComplexObject(rename_fields = "snake_case")]
impl ElectionResult {
    async fn election_candidate(&self, ctx: &Context<'_>) -> Result<Option<ElectionCandidate>> {
        loaders(ctx)?
            .election_candidate
            .load(self.election_candidate_id)
            .await
            .map_err(|err| ApiError::fetch("election candidate", err).extend())
    }
}
