use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Entity;

#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(complex, rename_fields = "snake_case")]
pub struct ElectionResult {
    pub id: i32,
    pub election_candidate_id: i32,
    pub votes_polled: i32,
    pub rank: i32,
    /// Outcome label such as `Won` or `Lost`.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for ElectionResult {
    type Id = i32;
    const TABLE: &'static str = "election_result";

    fn id(&self) -> i32 {
        self.id
    }
}
