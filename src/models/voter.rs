use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Entity;

/// An entry of the electoral roll, keyed by EPIC number.
#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Voter {
    pub id: i64,
    pub epic_number: String,
    pub first_name_english: String,
    pub first_name_local: Option<String>,
    pub last_name_english: Option<String>,
    pub last_name_local: Option<String>,
    pub gender: String,
    pub age: i32,
    pub relative_first_name_english: Option<String>,
    pub relative_first_name_local: Option<String>,
    pub relative_last_name_english: Option<String>,
    pub relative_last_name_local: Option<String>,
    pub state: String,
    pub parliamentary_constituency: String,
    pub assembly_constituency: String,
    pub polling_station: String,
    pub part_number_name: String,
    pub part_serial_number: i32,
    pub fetch_status: String,
    pub fetch_attempts: Option<i32>,
    pub error_message: Option<String>,
    pub last_attempt: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Voter {
    type Id = i64;
    const TABLE: &'static str = "voter_details";

    fn id(&self) -> i64 {
        self.id
    }
}
