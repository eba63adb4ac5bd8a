use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::context::pool;
use crate::error::ApiError;
use crate::models::Voter;
use crate::repository;

#[derive(Default)]
pub struct VoterQuery;

#[Object(rename_fields = "snake_case", rename_args = "snake_case")]
impl VoterQuery {
    async fn voter(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Voter>> {
        repository::find_by_id::<Voter>(pool(ctx)?, id)
            .await
            .map_err(|err| ApiError::fetch("voter", err).extend())
    }

    async fn voters(&self, ctx: &Context<'_>) -> Result<Vec<Voter>> {
        repository::find_all::<Voter>(pool(ctx)?)
            .await
            .map_err(|err| ApiError::fetch("voters", err).extend())
    }
}
