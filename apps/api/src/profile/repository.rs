use sqlx::PgPool;

use crate::models::preferences::UserPreferences;

pub async fn get_preferences(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<UserPreferences>, sqlx::Error> {
    sqlx::query_as::<_, UserPreferences>("SELECT * FROM user_preferences WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Points the user's master résumé at `url`, replacing any previous one.
pub async fn set_master_resume(
    pool: &PgPool,
    user_id: &str,
    url: &str,
) -> Result<UserPreferences, sqlx::Error> {
    sqlx::query_as::<_, UserPreferences>(
        r#"
        INSERT INTO user_preferences (user_id, master_resume_url, updated_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id)
        DO UPDATE SET master_resume_url = EXCLUDED.master_resume_url, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(url)
    .fetch_one(pool)
    .await
}
