use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Being edited, not yet eligible for publishing
    Draft,
    /// Waiting for its schedule time
    Scheduled,
    /// Successfully published to every target platform
    Published,
    /// At least one platform publish failed, or a critical error occurred
    Failed,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Published => "published",
            PostStatus::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(PostStatus::Draft),
            "scheduled" => Some(PostStatus::Scheduled),
            "published" => Some(PostStatus::Published),
            "failed" => Some(PostStatus::Failed),
            _ => None,
        }
    }
}

/// Supported platform kinds
///
/// Closed set: the registry binds each kind to exactly one adapter, resolved
/// by this enum rather than free-form string matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Twitter,
    Linkedin,
    Facebook,
    Instagram,
}

impl PlatformKind {
    pub const ALL: [PlatformKind; 4] = [
        PlatformKind::Twitter,
        PlatformKind::Linkedin,
        PlatformKind::Facebook,
        PlatformKind::Instagram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::Twitter => "twitter",
            PlatformKind::Linkedin => "linkedin",
            PlatformKind::Facebook => "facebook",
            PlatformKind::Instagram => "instagram",
        }
    }

    /// Case-insensitive parse of a stored platform type
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "twitter" => Some(PlatformKind::Twitter),
            "linkedin" => Some(PlatformKind::Linkedin),
            "facebook" => Some(PlatformKind::Facebook),
            "instagram" => Some(PlatformKind::Instagram),
            _ => None,
        }
    }
}

/// A scheduled post row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Lifecycle status, stored as lowercase text
    pub status: String,

    /// When the post should be published
    pub schedule_time: Option<DateTime<Utc>>,

    /// Target social_platforms ids; may be empty or absent
    pub platform_ids: Option<Vec<i64>>,

    /// Content mapping; carries at least a "text" field
    pub content_text: serde_json::Value,

    /// Path of the attached image asset, if any
    pub image_path: Option<String>,

    /// Set when the post reaches published status
    pub published_at: Option<DateTime<Utc>>,

    /// Serialized outcome summary written by the publish job
    pub remarks: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A connected social-media account row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SocialPlatform {
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Platform kind, stored as lowercase text (see [`PlatformKind`])
    pub platform_type: String,

    pub created_at: DateTime<Utc>,
}

/// Aggregated outcome of one publish job, serialized into `posts.remarks`
///
/// The three remark formats are fixed:
/// - full success: JSON array of provider post ids
/// - partial/total platform failure: JSON object with `successes` and
///   `failures` arrays
/// - critical failure: plain non-JSON string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { post_ids: Vec<String> },
    Failed { successes: Vec<String>, failures: Vec<String> },
    Critical { message: String },
}

#[derive(Serialize)]
struct FailureRemarks<'a> {
    successes: &'a [String],
    failures: &'a [String],
}

impl PublishOutcome {
    /// Target post status for this outcome
    pub fn status(&self) -> PostStatus {
        match self {
            PublishOutcome::Published { .. } => PostStatus::Published,
            PublishOutcome::Failed { .. } | PublishOutcome::Critical { .. } => PostStatus::Failed,
        }
    }

    /// Serialize into the remarks column format
    pub fn to_remarks(&self) -> Result<String, serde_json::Error> {
        match self {
            PublishOutcome::Published { post_ids } => serde_json::to_string(post_ids),
            PublishOutcome::Failed {
                successes,
                failures,
            } => serde_json::to_string(&FailureRemarks {
                successes,
                failures,
            }),
            PublishOutcome::Critical { message } => Ok(format!(
                "A critical error occurred during publishing: {}",
                message
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_status_round_trip() {
        for status in [
            PostStatus::Draft,
            PostStatus::Scheduled,
            PostStatus::Published,
            PostStatus::Failed,
        ] {
            assert_eq!(PostStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(PostStatus::from_str("SCHEDULED"), Some(PostStatus::Scheduled));
        assert_eq!(PostStatus::from_str("archived"), None);
    }

    #[test]
    fn test_platform_kind_parse_is_case_insensitive() {
        assert_eq!(PlatformKind::from_str("Twitter"), Some(PlatformKind::Twitter));
        assert_eq!(PlatformKind::from_str("LINKEDIN"), Some(PlatformKind::Linkedin));
        assert_eq!(PlatformKind::from_str("myspace"), None);
    }

    #[test]
    fn test_published_remarks_is_json_array() {
        let outcome = PublishOutcome::Published {
            post_ids: vec!["tw_12345".to_string()],
        };
        assert_eq!(outcome.to_remarks().unwrap(), r#"["tw_12345"]"#);
        assert_eq!(outcome.status(), PostStatus::Published);
    }

    #[test]
    fn test_failed_remarks_is_json_object_with_both_partitions() {
        let outcome = PublishOutcome::Failed {
            successes: vec!["abc".to_string()],
            failures: vec!["Platform Error: rate limited".to_string()],
        };
        assert_eq!(
            outcome.to_remarks().unwrap(),
            r#"{"successes":["abc"],"failures":["Platform Error: rate limited"]}"#
        );
        assert_eq!(outcome.status(), PostStatus::Failed);
    }

    #[test]
    fn test_critical_remarks_is_plain_string() {
        let outcome = PublishOutcome::Critical {
            message: "No valid platforms found for this post.".to_string(),
        };
        let remarks = outcome.to_remarks().unwrap();
        assert_eq!(
            remarks,
            "A critical error occurred during publishing: No valid platforms found for this post."
        );
        assert!(serde_json::from_str::<serde_json::Value>(&remarks).is_err());
        assert_eq!(outcome.status(), PostStatus::Failed);
    }
}
