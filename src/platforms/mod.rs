/// Platform adapter layer
///
/// Each supported platform kind is bound to one implementation of the
/// publish capability through a static registry. Adapters report outcomes
/// three ways: a success response carrying the provider-assigned post id, a
/// structured rejection carrying an error description, or a
/// [`PlatformError`] for integration-level failures (outages, rate limits,
/// credential problems).
pub mod mock;

use crate::models::PlatformKind;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub use mock::{MockBehavior, MockPlatformClient};

/// Content handed to a platform adapter for publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPayload {
    /// Post body text; empty when the post carries no text
    pub text: String,
    /// Path of the attached image asset, if any
    pub image: Option<String>,
}

/// Adapter response for a publish call
#[derive(Debug, Clone)]
pub struct PublishResponse {
    pub success: bool,
    /// Provider-assigned post id, present on success
    pub post_id: Option<String>,
    /// Error description, present on a structured rejection
    pub error: Option<String>,
}

impl PublishResponse {
    pub fn published(post_id: impl Into<String>) -> Self {
        Self {
            success: true,
            post_id: Some(post_id.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            post_id: None,
            error: Some(error.into()),
        }
    }
}

/// Platform integration error, distinct from a structured rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("platform unreachable: {0}")]
    Unreachable(String),

    #[error("rate limited")]
    RateLimited,
}

/// The publish capability every platform integration exposes
#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn post_content(
        &self,
        payload: &ContentPayload,
    ) -> Result<PublishResponse, PlatformError>;
}

/// Static map from platform kind to its adapter
pub struct PlatformRegistry {
    clients: HashMap<PlatformKind, Arc<dyn PlatformClient>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    /// Registry with one mock integration per supported kind
    pub fn with_mock_clients() -> Self {
        let mut registry = Self::new();
        for kind in PlatformKind::ALL {
            registry.register(kind, Arc::new(MockPlatformClient::new(kind)));
        }
        registry
    }

    pub fn register(&mut self, kind: PlatformKind, client: Arc<dyn PlatformClient>) {
        self.clients.insert(kind, client);
    }

    pub fn get(&self, kind: PlatformKind) -> Option<Arc<dyn PlatformClient>> {
        self.clients.get(&kind).cloned()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
