/// Business logic layer for publisher-service
///
/// - Publish service: loads one scheduled post, fans out to its target
///   platforms, and commits the aggregated outcome
pub mod publisher;

pub use publisher::{PublishResult, PublishService};
