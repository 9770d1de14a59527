/// Mock platform integrations
///
/// Stand-ins for the real social-media API clients. The default behavior
/// publishes successfully with a synthetic provider post id; rejection and
/// integration-error behaviors can be injected per client for fault
/// simulation and tests.
use super::{ContentPayload, PlatformClient, PlatformError, PublishResponse};
use crate::models::PlatformKind;
use async_trait::async_trait;
use rand::Rng;

/// How a mock client responds to publish calls
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Publish successfully with a synthetic post id
    Succeed,
    /// Return a structured rejection with the given description
    Reject(String),
    /// Fail with a platform integration error
    Error(PlatformError),
    /// Panic inside the call (used by tests to verify fan-out isolation)
    Panic,
}

pub struct MockPlatformClient {
    kind: PlatformKind,
    behavior: MockBehavior,
}

impl MockPlatformClient {
    pub fn new(kind: PlatformKind) -> Self {
        Self {
            kind,
            behavior: MockBehavior::Succeed,
        }
    }

    pub fn with_behavior(kind: PlatformKind, behavior: MockBehavior) -> Self {
        Self { kind, behavior }
    }

    /// Provider id prefix, e.g. "tw_12345" for twitter
    fn id_prefix(&self) -> &'static str {
        match self.kind {
            PlatformKind::Twitter => "tw_",
            PlatformKind::Linkedin => "li_",
            PlatformKind::Facebook => "fb_",
            PlatformKind::Instagram => "ig_",
        }
    }

    fn synthetic_post_id(&self) -> String {
        let suffix: u32 = rand::thread_rng().gen_range(10_000..100_000);
        format!("{}{}", self.id_prefix(), suffix)
    }
}

#[async_trait]
impl PlatformClient for MockPlatformClient {
    async fn post_content(
        &self,
        payload: &ContentPayload,
    ) -> Result<PublishResponse, PlatformError> {
        tracing::debug!(
            platform = self.kind.as_str(),
            text_len = payload.text.len(),
            has_image = payload.image.is_some(),
            "Mock platform received publish call"
        );

        match &self.behavior {
            MockBehavior::Succeed => Ok(PublishResponse::published(self.synthetic_post_id())),
            MockBehavior::Reject(reason) => Ok(PublishResponse::rejected(reason.clone())),
            MockBehavior::Error(err) => Err(err.clone()),
            MockBehavior::Panic => panic!(
                "mock {} client panicked during publish",
                self.kind.as_str()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ContentPayload {
        ContentPayload {
            text: "hello".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_default_mock_succeeds_with_prefixed_id() {
        let client = MockPlatformClient::new(PlatformKind::Twitter);
        let response = client.post_content(&payload()).await.unwrap();
        assert!(response.success);
        let post_id = response.post_id.unwrap();
        assert!(post_id.starts_with("tw_"), "unexpected id {}", post_id);
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_reject_behavior_returns_structured_failure() {
        let client = MockPlatformClient::with_behavior(
            PlatformKind::Linkedin,
            MockBehavior::Reject("content policy violation".to_string()),
        );
        let response = client.post_content(&payload()).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("content policy violation"));
        assert!(response.post_id.is_none());
    }

    #[tokio::test]
    async fn test_error_behavior_raises_platform_error() {
        let client = MockPlatformClient::with_behavior(
            PlatformKind::Facebook,
            MockBehavior::Error(PlatformError::RateLimited),
        );
        let err = client.post_content(&payload()).await.unwrap_err();
        assert_eq!(err, PlatformError::RateLimited);
    }
}
