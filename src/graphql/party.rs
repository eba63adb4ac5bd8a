use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::context::{loaders, pool};
use crate::error::ApiError;
use crate::models::Party;
use crate::repository;

#[derive(Default)]
pub struct PartyQuery;

#[Object(rename_fields = "snake_case", rename_args = "snake_case")]
impl PartyQuery {
    async fn party(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Party>> {
        loaders(ctx)?.party.load(id).await.map_err(|err| ApiError::fetch("party", err).extend())
    }

    async fn parties(&self, ctx: &Context<'_>) -> Result<Vec<Party>> {
        repository::find_all::<Party>(pool(ctx)?)
            .await
            .map_err(|err| ApiError::fetch("parties", err).extend())
    }
}
