//! The GraphQL schema: one query/mutation object per entity, merged into the roots.

use std::sync::Arc;

use async_graphql::{EmptySubscription, MergedObject, Schema};
use sqlx::mysql::MySqlPool;

use crate::auth::Authenticator;

mod auth;
mod candidate;
mod constituency;
mod context;
mod election;
mod election_candidate;
mod election_result;
mod party;
mod voter;

pub use auth::{AuthPayload, LoginInput, SignupInput};
pub use context::Viewer;

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    candidate::CandidateQuery,
    party::PartyQuery,
    constituency::ConstituencyQuery,
    election::ElectionQuery,
    election_candidate::ElectionCandidateQuery,
    election_result::ElectionResultQuery,
    voter::VoterQuery,
    auth::AuthQuery,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(auth::AuthMutation);

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the process-wide data every resolver may use. Per-request data
/// ([`Loaders`](crate::registry::Loaders) and [`Viewer`]) is attached to each request instead.
pub fn build_schema(pool: MySqlPool, authenticator: Arc<Authenticator>) -> ApiSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(pool)
        .data(authenticator)
        .finish()
}
