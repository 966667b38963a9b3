use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::MentorStatsRow;

/// Reward-tier inputs for a mentor, `None` if the user has no mentor profile
pub async fn find_stats<'e, E>(executor: E, mentor_id: Uuid) -> Result<Option<MentorStatsRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                mp.sessions_completed,
                mp.average_rating,
                (SELECT COUNT(*) FROM programs p WHERE p.mentor_id = mp.user_id) AS programs_created
            FROM mentor_profiles mp
            WHERE mp.user_id = $1
        "#,
    )
    .bind(mentor_id)
    .fetch_optional(executor)
    .await
}

/// Start an empty session history for a new mentor or trainer
pub async fn create_profile<'e, E>(executor: E, user_id: Uuid, headline: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO mentor_profiles (user_id, headline)
            VALUES ($1, $2)
        "#,
    )
    .bind(user_id)
    .bind(headline)
    .execute(executor)
    .await?;
    Ok(())
}
