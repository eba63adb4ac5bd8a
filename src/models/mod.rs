//! Row types of the election dataset.
//!
//! Every table keyed by a numeric `id` column implements [`Entity`], which is all the generic
//! repository functions and the batched loaders need to know about it.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, MySql};

mod candidate;
mod constituency;
mod election;
mod election_candidate;
mod election_result;
mod party;
mod user;
mod voter;

pub use candidate::Candidate;
pub use constituency::Constituency;
pub use election::Election;
pub use election_candidate::ElectionCandidate;
pub use election_result::ElectionResult;
pub use party::Party;
pub use user::{NewUser, User, UserView};
pub use voter::Voter;

/// A row of a table whose primary key is the numeric `id` column.
pub trait Entity: for<'r> FromRow<'r, MySqlRow> + Debug + Clone + Send + Sync + Unpin + 'static {
    type Id: Copy
        + Eq
        + Hash
        + Debug
        + Send
        + Sync
        + 'static
        + sqlx::Type<MySql>
        + for<'q> sqlx::Encode<'q, MySql>;

    const TABLE: &'static str;

    fn id(&self) -> Self::Id;
}

/// Free-form JSON column, exposed to GraphQL as the `JSON` scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct JsonDocument(pub serde_json::Value);

async_graphql::scalar!(JsonDocument, "JSON", "Arbitrary JSON document stored alongside a row.");
