use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Entity;

#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Party {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub short_name: String,
    pub party_type: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Party {
    type Id = i32;
    const TABLE: &'static str = "party";

    fn id(&self) -> i32 {
        self.id
    }
}
