use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::context::{loaders, pool};
use crate::error::ApiError;
use crate::models::Constituency;
use crate::repository;

#[derive(Default)]
pub struct ConstituencyQuery;

#[Object(rename_fields = "snake_case", rename_args = "snake_case")]
impl ConstituencyQuery {
    async fn constituency(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Constituency>> {
        loaders(ctx)?
            .constituency
            .load(id)
            .await
            .map_err(|err| ApiError::fetch("constituency", err).extend())
    }

    async fn constituencies(&self, ctx: &Context<'_>) -> Result<Vec<Constituency>> {
        repository::find_all::<Constituency>(pool(ctx)?)
            .await
            .map_err(|err| ApiError::fetch("constituencies", err).extend())
    }
}
