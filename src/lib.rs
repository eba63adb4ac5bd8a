mod batch_function;
mod cache;
mod loader;
mod loader_op;
mod loader_worker;
#[cfg(feature = "stats")]
mod worker_stats;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod models;
pub mod registry;
pub mod repository;
pub mod server;

pub use batch_function::BatchFunction;
pub use loader::{LoadError, Loader, DEFAULT_BATCH_DELAY};
pub use registry::Loaders;
