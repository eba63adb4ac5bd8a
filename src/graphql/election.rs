use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result};

use super::context::{loaders, pool};
use crate::error::ApiError;
use crate::models::{Constituency, Election};
use crate::repository;

#[derive(Default)]
pub struct ElectionQuery;

#[Object(rename_fields = "snake_case", rename_args = "snake_case")]
impl ElectionQuery {
    async fn election(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Election>> {
        loaders(ctx)?
            .election
            .load(id)
            .await
            .map_err(|err| ApiError::fetch("election", err).extend())
    }

    async fn elections(&self, ctx: &Context<'_>) -> Result<Vec<Election>> {
        repository::find_all::<Election>(pool(ctx)?)
            .await
            .map_err(|err| ApiError::fetch("elections", err).extend())
    }
}

#[ComplexObject(rename_fields = "snake_case")]
impl Election {
    async fn constituency(&self, ctx: &Context<'_>) -> Result<Option<Constituency>> {
        loaders(ctx)?
            .constituency
            .load(self.constituency_id)
            .await
            .map_err(|err| ApiError::fetch("constituency", err).extend())
    }
}
