use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Result};
use sqlx::mysql::MySqlPool;

use crate::auth::{Authenticator, TokenData};
use crate::error::ApiError;
use crate::registry::Loaders;

/// The authenticated user of the current request, if any.
#[derive(Debug, Clone, Default)]
pub struct Viewer(pub Option<TokenData>);

pub fn require_auth<'a>(ctx: &Context<'a>) -> Result<&'a TokenData> {
    ctx.data_opt::<Viewer>()
        .and_then(|viewer| viewer.0.as_ref())
        .ok_or_else(|| ApiError::Unauthorized.extend())
}

pub fn loaders<'a>(ctx: &Context<'a>) -> Result<&'a Loaders> {
    ctx.data::<Loaders>()
}

pub fn pool<'a>(ctx: &Context<'a>) -> Result<&'a MySqlPool> {
    ctx.data::<MySqlPool>()
}

pub fn authenticator<'a>(ctx: &Context<'a>) -> Result<&'a Authenticator> {
    ctx.data::<Arc<Authenticator>>().map(Arc::as_ref)
}
