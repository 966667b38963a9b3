use sqlx::{Executor, Postgres};

use crate::models::MenteeProfileInsert;

pub async fn create_profile<'e, E>(
    executor: E,
    profile: &MenteeProfileInsert,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO mentee_profiles (
                user_id, phone, education_level, occupation,
                experience_level, learning_goals, interests, availability
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(profile.user_id)
    .bind(&profile.phone)
    .bind(&profile.education_level)
    .bind(&profile.occupation)
    .bind(&profile.experience_level)
    .bind(&profile.learning_goals)
    .bind(&profile.interests)
    .bind(&profile.availability)
    .execute(executor)
    .await?;
    Ok(())
}
