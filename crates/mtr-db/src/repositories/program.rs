use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{
    ModuleInsert, ModuleRow, ProgramInsert, ProgramOwnership, ProgramRow, TopicInsert, TopicRow,
};

pub async fn list_published<'e, E>(executor: E) -> Result<Vec<ProgramRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                p.id,
                p.mentor_id,
                (u.first_name || ' ' || u.last_name) AS mentor_name,
                p.title,
                p.description,
                p.category,
                p.level,
                p.price_cents,
                p.currency::text AS currency,
                p.status,
                p.rating,
                (SELECT COUNT(*) FROM enrollments e WHERE e.program_id = p.id) AS enrolled_count,
                p.duration_weeks,
                p.created_at
            FROM programs p
            JOIN users u ON u.id = p.mentor_id
            WHERE p.status = 'published'
            ORDER BY p.created_at DESC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, program_id: Uuid) -> Result<Option<ProgramRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                p.id,
                p.mentor_id,
                (u.first_name || ' ' || u.last_name) AS mentor_name,
                p.title,
                p.description,
                p.category,
                p.level,
                p.price_cents,
                p.currency::text AS currency,
                p.status,
                p.rating,
                (SELECT COUNT(*) FROM enrollments e WHERE e.program_id = p.id) AS enrolled_count,
                p.duration_weeks,
                p.created_at
            FROM programs p
            JOIN users u ON u.id = p.mentor_id
            WHERE p.id = $1
        "#,
    )
    .bind(program_id)
    .fetch_optional(executor)
    .await
}

pub async fn create_program<'e, E>(executor: E, program: &ProgramInsert) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO programs (
                mentor_id, title, description, category, level,
                price_cents, currency, status, duration_weeks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
        "#,
    )
    .bind(program.mentor_id)
    .bind(&program.title)
    .bind(&program.description)
    .bind(&program.category)
    .bind(&program.level)
    .bind(program.price_cents)
    .bind(&program.currency)
    .bind(&program.status)
    .bind(program.duration_weeks)
    .fetch_one(executor)
    .await
}

pub async fn find_ownership<'e, E>(
    executor: E,
    program_id: Uuid,
) -> Result<Option<ProgramOwnership>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT mentor_id, status
            FROM programs
            WHERE id = $1
        "#,
    )
    .bind(program_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_modules<'e, E>(executor: E, program_id: Uuid) -> Result<Vec<ModuleRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, program_id, position, title, description, learning_objectives
            FROM program_modules
            WHERE program_id = $1
            ORDER BY position
        "#,
    )
    .bind(program_id)
    .fetch_all(executor)
    .await
}

pub async fn find_topics<'e, E>(executor: E, program_id: Uuid) -> Result<Vec<TopicRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                t.id,
                t.module_id,
                t.position,
                t.title,
                t.topic_type,
                t.duration_minutes,
                t.is_published,
                t.description
            FROM module_topics t
            JOIN program_modules m ON m.id = t.module_id
            WHERE m.program_id = $1
            ORDER BY m.position, t.position
        "#,
    )
    .bind(program_id)
    .fetch_all(executor)
    .await
}

/// Remove every module (and, by cascade, topic) of a program
pub async fn delete_modules<'e, E>(executor: E, program_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM program_modules
            WHERE program_id = $1
        "#,
    )
    .bind(program_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn insert_module<'e, E>(
    executor: E,
    program_id: Uuid,
    module: &ModuleInsert,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO program_modules (id, program_id, position, title, description, learning_objectives)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(module.id)
    .bind(program_id)
    .bind(module.position)
    .bind(&module.title)
    .bind(&module.description)
    .bind(&module.learning_objectives)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_topic<'e, E>(
    executor: E,
    module_id: Uuid,
    topic: &TopicInsert,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO module_topics (
                id, module_id, position, title, topic_type,
                duration_minutes, is_published, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(topic.id)
    .bind(module_id)
    .bind(topic.position)
    .bind(&topic.title)
    .bind(&topic.topic_type)
    .bind(topic.duration_minutes)
    .bind(topic.is_published)
    .bind(&topic.description)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn touch<'e, E>(executor: E, program_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE programs
            SET updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(program_id)
    .execute(executor)
    .await?;
    Ok(())
}
