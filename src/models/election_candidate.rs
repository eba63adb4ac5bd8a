use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Entity;

/// A candidate's participation in an election, standing for a party in a constituency.
#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(complex, rename_fields = "snake_case")]
pub struct ElectionCandidate {
    pub id: i32,
    pub election_id: i32,
    pub candidate_id: i32,
    pub constituency_id: i32,
    pub party_id: i32,
    pub votes_polled: i32,
    pub created_at: DateTime<Utc>,
}

impl Entity for ElectionCandidate {
    type Id = i32;
    const TABLE: &'static str = "election_candidate";

    fn id(&self) -> i32 {
        self.id
    }
}
