/// Background jobs
///
/// - `scheduler`: recurring due-post scanner that feeds the publish queue
pub mod scheduler;
