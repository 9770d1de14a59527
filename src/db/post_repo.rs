use crate::models::{Post, PostStatus};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Create a new post
/// Returns the created post
pub async fn create_post(
    pool: &PgPool,
    user_id: i64,
    status: PostStatus,
    schedule_time: Option<DateTime<Utc>>,
    platform_ids: &[i64],
    content_text: &serde_json::Value,
    image_path: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, status, schedule_time, platform_ids, content_text, image_path)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, status, schedule_time, platform_ids, content_text, image_path,
                  published_at, remarks, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(status.as_str())
    .bind(schedule_time)
    .bind(platform_ids)
    .bind(content_text)
    .bind(image_path)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, status, schedule_time, platform_ids, content_text, image_path,
               published_at, remarks, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find all posts that are due for publishing: still scheduled, with a
/// schedule time at or before the given instant
pub async fn find_due_posts(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, status, schedule_time, platform_ids, content_text, image_path,
               published_at, remarks, created_at, updated_at
        FROM posts
        WHERE status = $1 AND schedule_time IS NOT NULL AND schedule_time <= $2
        ORDER BY schedule_time ASC
        "#,
    )
    .bind(PostStatus::Scheduled.as_str())
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Record the terminal outcome of a publish job in one update:
/// status, remarks, and (on success) published_at
pub async fn record_publish_outcome(
    pool: &PgPool,
    post_id: i64,
    status: PostStatus,
    remarks: &str,
    published_at: Option<DateTime<Utc>>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET status = $1, remarks = $2, published_at = $3, updated_at = NOW()
        WHERE id = $4
        "#,
    )
    .bind(status.as_str())
    .bind(remarks)
    .bind(published_at)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}
