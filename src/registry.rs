//! Per-request loader sets.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::MySqlPool;

use crate::batch_function::BatchFunction;
use crate::loader::{Loader, DEFAULT_BATCH_DELAY};
use crate::models::{Candidate, Constituency, Election, ElectionCandidate, Entity, Party};
use crate::repository;

/// Batch function that fetches any [`Entity`] by primary key with one `IN (...)` query and keys
/// every returned row by its own id column.
pub struct ById<T>(PhantomData<fn() -> T>);

impl<T> Default for ById<T> {
    fn default() -> Self {
        ById(PhantomData)
    }
}

#[async_trait]
impl<T: Entity> BatchFunction<T::Id, T> for ById<T> {
    type Context = MySqlPool;
    type Error = sqlx::Error;

    async fn load(keys: &[T::Id], pool: &MySqlPool) -> Result<Vec<(T::Id, T)>, sqlx::Error> {
        let rows = repository::find_many::<T>(pool, keys).await?;
        Ok(rows.into_iter().map(|row| (row.id(), row)).collect())
    }
}

pub type EntityLoader<T> = Loader<<T as Entity>::Id, T, sqlx::Error>;

fn entity_loader<T: Entity>(pool: &MySqlPool, delay: Duration) -> EntityLoader<T> {
    Loader::with_delay(ById::<T>::default(), pool.clone(), delay)
}

/// The loaders of one GraphQL request.
///
/// Build a fresh set for every request and drop it when the request completes: nothing loaded
/// for one request is ever visible to another.
pub struct Loaders {
    pub candidate: EntityLoader<Candidate>,
    pub party: EntityLoader<Party>,
    pub constituency: EntityLoader<Constituency>,
    pub election: EntityLoader<Election>,
    pub election_candidate: EntityLoader<ElectionCandidate>,
}

impl Loaders {
    pub fn new(pool: &MySqlPool) -> Self {
        Self::with_delay(pool, DEFAULT_BATCH_DELAY)
    }

    pub fn with_delay(pool: &MySqlPool, delay: Duration) -> Self {
        Self {
            candidate: entity_loader(pool, delay),
            party: entity_loader(pool, delay),
            constituency: entity_loader(pool, delay),
            election: entity_loader(pool, delay),
            election_candidate: entity_loader(pool, delay),
        }
    }
}
