use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result};

use super::context::{loaders, pool};
use crate::error::ApiError;
use crate::models::{Candidate, Constituency, Election, ElectionCandidate, Party};
use crate::repository;

#[derive(Default)]
pub struct ElectionCandidateQuery;

#[Object(rename_fields = "snake_case", rename_args = "snake_case")]
impl ElectionCandidateQuery {
    async fn election_candidate(
        &self,
        ctx: &Context<'_>,
        id: i32,
    ) -> Result<Option<ElectionCandidate>> {
        loaders(ctx)?
            .election_candidate
            .load(id)
            .await
            .map_err(|err| ApiError::fetch("election candidate", err).extend())
    }

    async fn election_candidates(&self, ctx: &Context<'_>) -> Result<Vec<ElectionCandidate>> {
        repository::find_all::<ElectionCandidate>(pool(ctx)?)
            .await
            .map_err(|err| ApiError::fetch("election candidates", err).extend())
    }
}

/// Reference fields. Siblings across a result list share one query per entity type.
#[ComplexObject(rename_fields = "snake_case")]
impl ElectionCandidate {
    async fn election(&self, ctx: &Context<'_>) -> Result<Option<Election>> {
        loaders(ctx)?
            .election
            .load(self.election_id)
            .await
            .map_err(|err| ApiError::fetch("election", err).extend())
    }

    async fn candidate(&self, ctx: &Context<'_>) -> Result<Option<Candidate>> {
        loaders(ctx)?
            .candidate
            .load(self.candidate_id)
            .await
            .map_err(|err| ApiError::fetch("candidate", err).extend())
    }

    async fn constituency(&self, ctx: &Context<'_>) -> Result<Option<Constituency>> {
        loaders(ctx)?
            .constituency
            .load(self.constituency_id)
            .await
            .map_err(|err| ApiError::fetch("constituency", err).extend())
    }

    async fn party(&self, ctx: &Context<'_>) -> Result<Option<Party>> {
        loaders(ctx)?
            .party
            .load(self.party_id)
            .await
            .map_err(|err| ApiError::fetch("party", err).extend())
    }
}
