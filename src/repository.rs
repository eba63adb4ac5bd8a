//! Parameterized reads (and the single user write) against the row store.

use sqlx::mysql::MySqlPool;
use sqlx::{MySql, QueryBuilder};

use crate::error::ApiError;
use crate::models::{ElectionResult, Entity, NewUser, User};

pub async fn find_by_id<T: Entity>(pool: &MySqlPool, id: T::Id) -> Result<Option<T>, sqlx::Error> {
    let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
    sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(pool).await
}

pub async fn find_all<T: Entity>(pool: &MySqlPool) -> Result<Vec<T>, sqlx::Error> {
    let sql = format!("SELECT * FROM {} ORDER BY created_at DESC", T::TABLE);
    sqlx::query_as::<_, T>(&sql).fetch_all(pool).await
}

/// Fetches every row whose id is in `ids` with a single `IN (...)` query. Rows come back in
/// store order; ids without a row are simply missing from the result.
pub async fn find_many<T: Entity>(pool: &MySqlPool, ids: &[T::Id]) -> Result<Vec<T>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query = select_by_ids::<T>(ids);
    query.build_query_as::<T>().fetch_all(pool).await
}

fn select_by_ids<T: Entity>(ids: &[T::Id]) -> QueryBuilder<'static, MySql> {
    let mut query = QueryBuilder::new(format!("SELECT * FROM {} WHERE id IN (", T::TABLE));
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    query
}

const CONSTITUENCY_RESULTS_SQL: &str = "SELECT er.* FROM election_result er \
     JOIN election_candidate ec ON er.election_candidate_id = ec.id \
     JOIN election e ON ec.election_id = e.id \
     WHERE ec.constituency_id = ? AND e.year = ? \
     ORDER BY er.`rank` ASC";

/// Results of every candidate who stood in `constituency_id` in the election(s) of
/// `election_year`, best rank first.
pub async fn constituency_results(
    pool: &MySqlPool,
    constituency_id: i32,
    election_year: i32,
) -> Result<Vec<ElectionResult>, sqlx::Error> {
    sqlx::query_as::<_, ElectionResult>(CONSTITUENCY_RESULTS_SQL)
        .bind(constituency_id)
        .bind(election_year)
        .fetch_all(pool)
        .await
}

pub async fn find_user_by_email(pool: &MySqlPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Inserts a user and reads it back. A taken email maps to [`ApiError::EmailAlreadyExists`].
pub async fn create_user(pool: &MySqlPool, user: NewUser) -> Result<User, ApiError> {
    let inserted = sqlx::query("INSERT INTO users (email, password_hash, name) VALUES (?, ?, ?)")
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .execute(pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::EmailAlreadyExists,
            other => ApiError::Database(other),
        })?;

    let id = i32::try_from(inserted.last_insert_id()).map_err(ApiError::internal)?;
    find_by_id::<User>(pool, id).await?.ok_or(ApiError::Database(sqlx::Error::RowNotFound))
}
