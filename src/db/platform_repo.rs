use crate::models::SocialPlatform;
use sqlx::PgPool;

/// Create a connected platform account
/// Returns the created record
pub async fn create_platform(
    pool: &PgPool,
    user_id: i64,
    platform_type: &str,
) -> Result<SocialPlatform, sqlx::Error> {
    let platform = sqlx::query_as::<_, SocialPlatform>(
        r#"
        INSERT INTO social_platforms (user_id, platform_type)
        VALUES ($1, $2)
        RETURNING id, user_id, platform_type, created_at
        "#,
    )
    .bind(user_id)
    .bind(platform_type)
    .fetch_one(pool)
    .await?;

    Ok(platform)
}

/// Fetch all social platforms for a given list of IDs
///
/// An empty id list returns an empty result without touching the database.
pub async fn find_platforms_by_ids(
    pool: &PgPool,
    platform_ids: &[i64],
) -> Result<Vec<SocialPlatform>, sqlx::Error> {
    if platform_ids.is_empty() {
        return Ok(Vec::new());
    }

    let platforms = sqlx::query_as::<_, SocialPlatform>(
        r#"
        SELECT id, user_id, platform_type, created_at
        FROM social_platforms
        WHERE id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(platform_ids)
    .fetch_all(pool)
    .await?;

    Ok(platforms)
}
