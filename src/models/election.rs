use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Entity;

/// One election held in one constituency.
#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(complex, rename_fields = "snake_case")]
pub struct Election {
    pub id: i32,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub year: i32,
    pub constituency_id: i32,
    #[sqlx(rename = "type")]
    #[graphql(name = "type")]
    pub election_type: String,
    pub total_voters: i32,
    pub male_voters: i32,
    pub female_voters: i32,
    pub created_at: DateTime<Utc>,
}

impl Entity for Election {
    type Id = i32;
    const TABLE: &'static str = "election";

    fn id(&self) -> i32 {
        self.id
    }
}
