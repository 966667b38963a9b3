use sqlx::{Executor, Postgres};
use uuid::Uuid;

/// Enroll a mentee. Returns `false` when the enrollment already existed.
pub async fn enroll<'e, E>(executor: E, program_id: Uuid, mentee_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO enrollments (program_id, mentee_id)
            VALUES ($1, $2)
            ON CONFLICT (program_id, mentee_id) DO NOTHING
        "#,
    )
    .bind(program_id)
    .bind(mentee_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}
