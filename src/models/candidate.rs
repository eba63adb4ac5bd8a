use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::{Entity, JsonDocument};

/// A person contesting elections, with the affidavit details published for them.
#[derive(Debug, Clone, FromRow, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Candidate {
    pub id: i32,
    /// Identifier of the candidate on the myneta listing.
    pub neta_id: i32,
    pub name: String,
    pub caste: Option<String>,
    pub so_do_wo: Option<String>,
    pub age: i32,
    pub candidate_image: Option<String>,
    pub assembly_constituency: String,
    pub party: String,
    pub name_enrolled_as_voter_in: String,
    pub self_profession: Option<String>,
    pub spouse_profession: Option<String>,
    pub criminal_cases: Option<i32>,
    pub assets: Option<i64>,
    pub liabilities: Option<i64>,
    pub education_category: Option<String>,
    pub university_name: Option<String>,
    pub pan_itr: Option<JsonDocument>,
    pub details_of_criminal_cases: Option<JsonDocument>,
    pub details_of_movable_assets: Option<JsonDocument>,
    pub details_of_immovable_assets: Option<JsonDocument>,
    pub details_of_liabilities: Option<JsonDocument>,
    pub source_of_income: Option<JsonDocument>,
    pub contracts: Option<JsonDocument>,
    pub social_profiles: Option<JsonDocument>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Candidate {
    type Id = i32;
    const TABLE: &'static str = "candidates";

    fn id(&self) -> i32 {
        self.id
    }
}
