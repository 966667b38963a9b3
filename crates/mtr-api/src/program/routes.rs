use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use axum_extra::extract::WithRejection;
use mtr_db::repositories::{enrollment as enrollment_repo, program as program_repo};
use mtr_domain::{
    Curriculum, Module, NewProgram, ProgramDetail, ProgramQuery, ProgramStatus, ProgramSummary,
    Role,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model;
use crate::{
    ApiState, auth::AuthUser, error::ApiError, metrics, middleware::rate_limit, validation,
};

/// Postgres SQLSTATE for unique violations
const UNIQUE_VIOLATION: &str = "23505";

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .route("/programs", get(list_programs).post(create_program))
        .route("/programs/details/{id}", get(program_details))
        .route("/programs/{id}/curriculum", put(replace_curriculum))
        .route("/programs/{id}/enroll", post(enroll))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

#[derive(Debug, Serialize)]
pub struct ProgramListResponse {
    pub success: bool,
    pub programs: Vec<ProgramSummary>,
}

#[derive(Debug, Serialize)]
pub struct ProgramCreatedResponse {
    pub success: bool,
    pub message: String,
    pub program: ProgramSummary,
}

#[derive(Debug, Serialize)]
pub struct ProgramDetailResponse {
    pub success: bool,
    pub program: ProgramDetail,
}

#[derive(Debug, Deserialize)]
pub struct CurriculumPayload {
    pub modules: Vec<Module>,
}

#[derive(Debug, Serialize)]
pub struct CurriculumSavedResponse {
    pub success: bool,
    pub message: String,
    pub total_duration_minutes: u64,
}

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub success: bool,
    pub message: String,
}

fn program_not_found() -> ApiError {
    ApiError::NotFound("Program not found".to_string())
}

/// Published catalog, filtered and sorted by the query string
async fn list_programs(
    State(state): State<ApiState>,
    WithRejection(Query(query), _): WithRejection<Query<ProgramQuery>, ApiError>,
) -> Result<Json<ProgramListResponse>, ApiError> {
    let programs = program_repo::list_published(&state.pool)
        .await?
        .into_iter()
        .map(model::summary_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ProgramListResponse {
        success: true,
        programs: query.apply(programs),
    }))
}

/// Create a program owned by the caller, with an empty curriculum
async fn create_program(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    WithRejection(Json(new_program), _): WithRejection<Json<NewProgram>, ApiError>,
) -> Result<(StatusCode, Json<ProgramCreatedResponse>), ApiError> {
    auth_user.require_role(Role::can_author, "create a program")?;
    validation::validate_new_program(&new_program)?;

    let insert = model::program_insert(auth_user.user_id, new_program);
    let program_id = program_repo::create_program(&state.pool, &insert).await?;

    let row = program_repo::find_by_id(&state.pool, program_id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("program {program_id} missing after insert")))?;
    let program = model::summary_from_row(row)?;

    tracing::info!(
        %program_id,
        mentor_id = %auth_user.user_id,
        status = %program.status,
        "program created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ProgramCreatedResponse {
            success: true,
            message: "Program created".to_string(),
            program,
        }),
    ))
}

/// Program with nested modules and topics
///
/// Drafts and archived programs are only visible to their mentor and to
/// admins; everyone else gets a 404 so unpublished ids are not disclosed.
async fn program_details(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    WithRejection(Path(program_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Json<ProgramDetailResponse>, ApiError> {
    let row = program_repo::find_by_id(&state.pool, program_id)
        .await?
        .ok_or_else(program_not_found)?;
    let summary = model::summary_from_row(row)?;

    let visible = summary.status == ProgramStatus::Published
        || summary.mentor_id == auth_user.user_id
        || auth_user.role == Role::Admin;
    if !visible {
        return Err(program_not_found());
    }

    let modules = program_repo::find_modules(&state.pool, program_id).await?;
    let topics = program_repo::find_topics(&state.pool, program_id).await?;
    let curriculum = model::curriculum_from_rows(modules, topics)?;

    Ok(Json(ProgramDetailResponse {
        success: true,
        program: ProgramDetail::new(summary, curriculum),
    }))
}

/// Replace a program's modules and topics in one transaction
async fn replace_curriculum(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    WithRejection(Path(program_id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<CurriculumPayload>, ApiError>,
) -> Result<Json<CurriculumSavedResponse>, ApiError> {
    auth_user.require_role(Role::can_author, "edit a curriculum")?;

    let ownership = program_repo::find_ownership(&state.pool, program_id)
        .await?
        .ok_or_else(program_not_found)?;
    if ownership.mentor_id != auth_user.user_id && auth_user.role != Role::Admin {
        return Err(ApiError::Forbidden(
            "Only the program's mentor can edit its curriculum".to_string(),
        ));
    }

    let curriculum = Curriculum::from_modules(payload.modules);
    let issues = curriculum.issues();
    if !issues.is_empty() {
        let details = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::Validation(format!("Invalid curriculum: {details}")));
    }
    let inserts = model::module_inserts(&curriculum)?;

    let mut tx = state.pool.begin().await?;

    program_repo::delete_modules(&mut *tx, program_id).await?;
    for module in &inserts {
        program_repo::insert_module(&mut *tx, program_id, module)
            .await
            .map_err(conflicting_ids)?;
        for topic in &module.topics {
            program_repo::insert_topic(&mut *tx, module.id, topic)
                .await
                .map_err(conflicting_ids)?;
        }
    }
    program_repo::touch(&mut *tx, program_id).await?;

    tx.commit().await?;

    tracing::info!(
        %program_id,
        user_id = %auth_user.user_id,
        modules = inserts.len(),
        topics = curriculum.topic_count(),
        "curriculum saved"
    );

    Ok(Json(CurriculumSavedResponse {
        success: true,
        message: "Curriculum saved".to_string(),
        total_duration_minutes: curriculum.total_duration(),
    }))
}

/// Module and topic ids are global, so ids reused from another program collide
fn conflicting_ids(e: sqlx::Error) -> ApiError {
    match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            ApiError::Conflict("A module or topic id already exists in another program".to_string())
        }
        _ => ApiError::Database(e),
    }
}

async fn enroll(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    WithRejection(Path(program_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<(StatusCode, Json<EnrollResponse>), ApiError> {
    auth_user.require_role(|role| role == Role::Mentee, "enroll in a program")?;

    let ownership = program_repo::find_ownership(&state.pool, program_id)
        .await?
        .ok_or_else(program_not_found)?;
    if ownership.status.parse::<ProgramStatus>()? != ProgramStatus::Published {
        return Err(program_not_found());
    }

    let enrolled = enrollment_repo::enroll(&state.pool, program_id, auth_user.user_id).await?;
    metrics::record_enrollment_event(enrolled);
    if !enrolled {
        return Err(ApiError::Conflict(
            "An enrollment for this program already exists".to_string(),
        ));
    }

    tracing::info!(%program_id, mentee_id = %auth_user.user_id, "mentee enrolled");

    Ok((
        StatusCode::CREATED,
        Json(EnrollResponse {
            success: true,
            message: "Enrolled successfully".to_string(),
        }),
    ))
}
