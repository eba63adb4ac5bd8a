use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Entity;

#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Constituency {
    pub id: i32,
    pub name: String,
    pub state: String,
    /// Assembly constituency number within the state.
    pub ac_number: i32,
    pub created_at: DateTime<Utc>,
}

impl Entity for Constituency {
    type Id = i32;
    const TABLE: &'static str = "constituency";

    fn id(&self) -> i32 {
        self.id
    }
}
