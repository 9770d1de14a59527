/// Publish Job
///
/// Loads one post, resolves its target platform accounts, dispatches one
/// publish call per platform concurrently, and commits exactly one status
/// transition with the aggregated outcome.
///
/// All failures are absorbed here: callers (the queue worker) only ever see
/// a human-readable status line. A business or platform failure must not
/// look like an infrastructure error to the queue, so retries for still-due
/// posts happen through the post's status staying non-terminal, never
/// through re-raised errors.
use crate::db::{platform_repo, post_repo};
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{PlatformKind, Post, PostStatus, PublishOutcome, SocialPlatform};
use crate::platforms::{ContentPayload, PlatformRegistry};
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Outcome of one platform publish call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    /// Platform type as stored on the account record
    pub platform: String,
    pub success: bool,
    /// Provider post id on success, error description on failure
    pub details: String,
}

/// Executes publish jobs against one database pool and one adapter registry
pub struct PublishService {
    db: PgPool,
    registry: Arc<PlatformRegistry>,
}

impl PublishService {
    pub fn new(db: PgPool, registry: Arc<PlatformRegistry>) -> Self {
        Self { db, registry }
    }

    /// Run the publish job for one post id
    ///
    /// Returns a status line for logging; never panics or returns an error
    /// to the caller. NotFound and InvalidState are benign no-ops; every
    /// other error is the critical branch.
    pub async fn publish_post(&self, post_id: i64) -> String {
        info!(post_id, "Executing publish job");
        let job_start = Instant::now();

        let summary = match self.run(post_id).await {
            Ok(summary) => summary,
            Err(AppError::NotFound(_)) => {
                metrics::record_publish_job("skipped");
                format!("Post {} not found.", post_id)
            }
            Err(AppError::InvalidState(_)) => {
                metrics::record_publish_job("skipped");
                format!("Post {} not in scheduled state.", post_id)
            }
            Err(e) => self.record_critical(post_id, &e).await,
        };

        metrics::record_publish_duration(job_start.elapsed());
        summary
    }

    /// Load the post, verify it is still scheduled, then publish
    async fn run(&self, post_id: i64) -> Result<String> {
        let post = post_repo::find_post_by_id(&self.db, post_id)
            .await?
            .ok_or_else(|| {
                warn!(post_id, "Post not found");
                AppError::NotFound(format!("post {}", post_id))
            })?;

        // Idempotence guard against duplicate or delayed delivery. Plain
        // read-then-check: two truly concurrent deliveries of the same id
        // can both pass it (accepted gap, no row lock).
        if PostStatus::from_str(&post.status) != Some(PostStatus::Scheduled) {
            warn!(
                post_id,
                status = %post.status,
                "Post is not in a scheduled state, aborting"
            );
            return Err(AppError::InvalidState(format!(
                "post {} has status {}",
                post_id, post.status
            )));
        }

        self.execute(&post).await
    }

    /// Steps after the idempotence guard: resolve platforms, fan out,
    /// partition, commit. Any error escaping here is the critical branch.
    async fn execute(&self, post: &Post) -> Result<String> {
        let platform_ids = post.platform_ids.clone().unwrap_or_default();
        let platforms = platform_repo::find_platforms_by_ids(&self.db, &platform_ids).await?;

        if platforms.is_empty() {
            return Err(AppError::NoPlatforms(
                "No valid platforms found for this post.".to_string(),
            ));
        }

        let payload = build_content_payload(post);
        let results = dispatch_to_platforms(&self.registry, post.id, &platforms, &payload).await;

        let (successes, failures): (Vec<_>, Vec<_>) =
            results.into_iter().partition(|r| r.success);
        let success_count = successes.len();
        let failure_count = failures.len();

        let outcome = if failures.is_empty() {
            info!(post_id = post.id, "Post successfully published to all platforms");
            PublishOutcome::Published {
                post_ids: successes.into_iter().map(|r| r.details).collect(),
            }
        } else {
            error!(
                post_id = post.id,
                failures = failure_count,
                "Failed to publish post to one or more platforms"
            );
            PublishOutcome::Failed {
                successes: successes.into_iter().map(|r| r.details).collect(),
                failures: failures.into_iter().map(|r| r.details).collect(),
            }
        };

        self.commit_outcome(post.id, &outcome).await?;
        metrics::record_publish_job(if failure_count == 0 { "published" } else { "failed" });

        Ok(format!(
            "Processed post {}. Successes: {}, Failures: {}.",
            post.id, success_count, failure_count
        ))
    }

    /// Persist one terminal outcome: status, remarks, published_at
    async fn commit_outcome(&self, post_id: i64, outcome: &PublishOutcome) -> Result<()> {
        let remarks = outcome.to_remarks()?;
        let published_at = match outcome {
            PublishOutcome::Published { .. } => Some(Utc::now()),
            _ => None,
        };
        post_repo::record_publish_outcome(&self.db, post_id, outcome.status(), &remarks, published_at)
            .await?;
        Ok(())
    }

    /// Last-resort branch: force the post into failed with a plain-string
    /// remark. The commit itself is best-effort; a failure to record the
    /// failure is logged and nothing more.
    async fn record_critical(&self, post_id: i64, err: &AppError) -> String {
        error!(post_id, error = %err, "A critical error occurred while publishing");
        metrics::record_publish_job("critical");

        let outcome = PublishOutcome::Critical {
            message: err.to_string(),
        };
        if let Err(commit_err) = self.commit_outcome(post_id, &outcome).await {
            error!(
                post_id,
                error = %commit_err,
                "Failed to record critical publish outcome"
            );
        }

        format!("Critical error for post {}.", post_id)
    }
}

/// Build the adapter payload from a post: text (defaulting to empty) plus
/// the image path when an asset is attached
fn build_content_payload(post: &Post) -> ContentPayload {
    let text = post
        .content_text
        .get("text")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    ContentPayload {
        text,
        image: post.image_path.clone(),
    }
}

/// Fan out one publish call per platform, all spawned before any is
/// awaited, and join them all. A failing or panicking call never aborts
/// its siblings; it becomes a failure result in the aggregate.
async fn dispatch_to_platforms(
    registry: &Arc<PlatformRegistry>,
    post_id: i64,
    platforms: &[SocialPlatform],
    payload: &ContentPayload,
) -> Vec<PublishResult> {
    let mut tasks = Vec::with_capacity(platforms.len());

    for platform in platforms {
        let registry = Arc::clone(registry);
        let platform = platform.clone();
        let payload = payload.clone();
        tasks.push(tokio::spawn(async move {
            publish_to_platform(&registry, post_id, &platform, &payload).await
        }));
    }

    let mut results = Vec::with_capacity(platforms.len());
    for (task, platform) in tasks.into_iter().zip(platforms) {
        let result = match task.await {
            Ok(result) => result,
            Err(e) => {
                error!(
                    post_id,
                    platform = %platform.platform_type,
                    error = %e,
                    "Platform publish task aborted"
                );
                PublishResult {
                    platform: platform.platform_type.clone(),
                    success: false,
                    details: format!("Unexpected Error: {}", e),
                }
            }
        };
        metrics::record_platform_publish(&result.platform, result.success);
        results.push(result);
    }

    results
}

/// One platform publish call: resolve the adapter by kind and translate
/// its three-way response into a [`PublishResult`]
async fn publish_to_platform(
    registry: &PlatformRegistry,
    post_id: i64,
    platform: &SocialPlatform,
    payload: &ContentPayload,
) -> PublishResult {
    info!(
        post_id,
        platform = %platform.platform_type,
        "Publishing post to platform"
    );

    let Some(kind) = PlatformKind::from_str(&platform.platform_type) else {
        return PublishResult {
            platform: platform.platform_type.clone(),
            success: false,
            details: format!(
                "Unexpected Error: unsupported platform type '{}'",
                platform.platform_type
            ),
        };
    };

    let Some(client) = registry.get(kind) else {
        return PublishResult {
            platform: kind.as_str().to_string(),
            success: false,
            details: format!(
                "Unexpected Error: no client registered for platform '{}'",
                kind.as_str()
            ),
        };
    };

    match client.post_content(payload).await {
        Ok(response) if response.success => PublishResult {
            platform: kind.as_str().to_string(),
            success: true,
            details: response.post_id.unwrap_or_default(),
        },
        Ok(response) => PublishResult {
            platform: kind.as_str().to_string(),
            success: false,
            details: response
                .error
                .unwrap_or_else(|| "publish rejected by platform".to_string()),
        },
        Err(e) => PublishResult {
            platform: kind.as_str().to_string(),
            success: false,
            details: format!("Platform Error: {}", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::{MockBehavior, MockPlatformClient, PlatformError};
    use chrono::Utc;
    use serde_json::json;

    fn post_with_content(content_text: serde_json::Value, image_path: Option<&str>) -> Post {
        Post {
            id: 7,
            user_id: 1,
            status: "scheduled".to_string(),
            schedule_time: Some(Utc::now()),
            platform_ids: Some(vec![1, 2]),
            content_text,
            image_path: image_path.map(|s| s.to_string()),
            published_at: None,
            remarks: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn platform(id: i64, platform_type: &str) -> SocialPlatform {
        SocialPlatform {
            id,
            user_id: 1,
            platform_type: platform_type.to_string(),
            created_at: Utc::now(),
        }
    }

    fn registry_with(
        entries: Vec<(PlatformKind, MockBehavior)>,
    ) -> Arc<PlatformRegistry> {
        let mut registry = PlatformRegistry::new();
        for (kind, behavior) in entries {
            registry.register(
                kind,
                Arc::new(MockPlatformClient::with_behavior(kind, behavior)),
            );
        }
        Arc::new(registry)
    }

    #[test]
    fn test_payload_uses_text_field_and_image_path() {
        let post = post_with_content(json!({"text": "launch day"}), Some("/media/1.png"));
        let payload = build_content_payload(&post);
        assert_eq!(payload.text, "launch day");
        assert_eq!(payload.image.as_deref(), Some("/media/1.png"));
    }

    #[test]
    fn test_payload_defaults_to_empty_text_without_image() {
        let post = post_with_content(json!({}), None);
        let payload = build_content_payload(&post);
        assert_eq!(payload.text, "");
        assert!(payload.image.is_none());
    }

    #[tokio::test]
    async fn test_fan_out_all_success() {
        let registry = registry_with(vec![
            (PlatformKind::Twitter, MockBehavior::Succeed),
            (PlatformKind::Linkedin, MockBehavior::Succeed),
        ]);
        let platforms = vec![platform(1, "twitter"), platform(2, "linkedin")];
        let payload = build_content_payload(&post_with_content(json!({"text": "hi"}), None));

        let results = dispatch_to_platforms(&registry, 7, &platforms, &payload).await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.success));
        assert!(results[0].details.starts_with("tw_"));
        assert!(results[1].details.starts_with("li_"));
    }

    #[tokio::test]
    async fn test_fan_out_platform_error_does_not_abort_siblings() {
        let registry = registry_with(vec![
            (PlatformKind::Twitter, MockBehavior::Succeed),
            (
                PlatformKind::Linkedin,
                MockBehavior::Error(PlatformError::RateLimited),
            ),
        ]);
        let platforms = vec![platform(1, "twitter"), platform(2, "linkedin")];
        let payload = build_content_payload(&post_with_content(json!({"text": "hi"}), None));

        let results = dispatch_to_platforms(&registry, 7, &platforms, &payload).await;

        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(results[1].details, "Platform Error: rate limited");
    }

    #[tokio::test]
    async fn test_fan_out_structured_rejection_carries_adapter_detail() {
        let registry = registry_with(vec![(
            PlatformKind::Facebook,
            MockBehavior::Reject("duplicate content".to_string()),
        )]);
        let platforms = vec![platform(3, "facebook")];
        let payload = build_content_payload(&post_with_content(json!({"text": "hi"}), None));

        let results = dispatch_to_platforms(&registry, 7, &platforms, &payload).await;

        assert!(!results[0].success);
        assert_eq!(results[0].details, "duplicate content");
    }

    #[tokio::test]
    async fn test_fan_out_panicking_adapter_is_isolated() {
        let registry = registry_with(vec![
            (PlatformKind::Twitter, MockBehavior::Succeed),
            (PlatformKind::Instagram, MockBehavior::Panic),
        ]);
        let platforms = vec![platform(1, "twitter"), platform(4, "instagram")];
        let payload = build_content_payload(&post_with_content(json!({"text": "hi"}), None));

        let results = dispatch_to_platforms(&registry, 7, &platforms, &payload).await;

        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert!(results[1].details.starts_with("Unexpected Error:"));
    }

    #[tokio::test]
    async fn test_fan_out_unknown_platform_type_is_a_failure_result() {
        let registry = registry_with(vec![(PlatformKind::Twitter, MockBehavior::Succeed)]);
        let platforms = vec![platform(1, "twitter"), platform(9, "myspace")];
        let payload = build_content_payload(&post_with_content(json!({"text": "hi"}), None));

        let results = dispatch_to_platforms(&registry, 7, &platforms, &payload).await;

        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(
            results[1].details,
            "Unexpected Error: unsupported platform type 'myspace'"
        );
    }

    #[tokio::test]
    async fn test_fan_out_unregistered_kind_is_a_failure_result() {
        let registry = registry_with(vec![(PlatformKind::Twitter, MockBehavior::Succeed)]);
        let platforms = vec![platform(2, "linkedin")];
        let payload = build_content_payload(&post_with_content(json!({"text": "hi"}), None));

        let results = dispatch_to_platforms(&registry, 7, &platforms, &payload).await;

        assert!(!results[0].success);
        assert_eq!(
            results[0].details,
            "Unexpected Error: no client registered for platform 'linkedin'"
        );
    }
}
