/// Publisher Service Library
///
/// Scheduled post publishing for connected social-media accounts. A periodic
/// scanner finds posts whose schedule time has arrived and enqueues one
/// publish job per post; each job fans out to the post's target platforms
/// concurrently and records the aggregated outcome on the post row.
///
/// # Modules
///
/// - `models`: Data structures for posts, platforms, and publish outcomes
/// - `db`: Database access layer and repositories
/// - `platforms`: Platform adapter contract, registry, and mock integrations
/// - `services`: Business logic layer (the publish job)
/// - `jobs`: Background jobs (the due-post scanner)
/// - `queue`: Job dispatch seam and in-process queue
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod metrics;
pub mod models;
pub mod platforms;
pub mod queue;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
