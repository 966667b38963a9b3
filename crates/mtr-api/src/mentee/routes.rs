use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_extra::extract::WithRejection;
use mtr_db::{
    models::MenteeProfileInsert,
    repositories::{mentee as mentee_repo, user as user_repo},
};
use mtr_domain::{MenteeRegistration, Role};
use serde::Serialize;

use crate::{
    ApiState,
    auth::service::{self, NewAccount},
    error::ApiError,
    metrics,
    middleware::rate_limit,
    validation,
};

/// Message for a duplicate account; clients match on "already exists"
pub const DUPLICATE_MENTEE: &str = "A mentee with this email already exists";

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .route("/mentees/register", post(register))
        .layer(make_rate_limit_layer!(
            rate_limit::AUTH_REPLENISH_MS,
            rate_limit::AUTH_BURST_SIZE
        ))
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

async fn register(
    State(state): State<ApiState>,
    WithRejection(Json(registration), _): WithRejection<Json<MenteeRegistration>, ApiError>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let result = create_mentee(&state, registration).await;
    metrics::record_registration_event(Role::Mentee.as_str(), result.is_ok());
    result?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful".to_string(),
        }),
    ))
}

async fn create_mentee(state: &ApiState, registration: MenteeRegistration) -> Result<(), ApiError> {
    validation::validate_registration(&registration)?;

    let email = registration.email.trim().to_lowercase();

    // Cheap check first; the unique constraint below still guards races
    if user_repo::email_exists(&state.pool, &email).await? {
        return Err(ApiError::Conflict(DUPLICATE_MENTEE.to_string()));
    }

    let password_hash =
        service::hash_password(registration.password.clone(), state.bcrypt_cost).await?;

    let mut tx = state.pool.begin().await?;

    let user_id = service::create_account(
        &mut *tx,
        NewAccount {
            email: &email,
            password_hash: &password_hash,
            first_name: registration.first_name.trim(),
            last_name: registration.last_name.trim(),
            role: Role::Mentee,
        },
        DUPLICATE_MENTEE,
    )
    .await?;

    let profile = MenteeProfileInsert {
        user_id,
        phone: registration.phone.trim().to_string(),
        education_level: registration.education_level.trim().to_string(),
        occupation: registration.occupation.trim().to_string(),
        experience_level: registration.experience_level.trim().to_string(),
        learning_goals: registration.learning_goals.trim().to_string(),
        interests: registration.interest_list(),
        availability: registration.availability.trim().to_string(),
    };
    mentee_repo::create_profile(&mut *tx, &profile).await?;

    tx.commit().await?;

    tracing::info!(%user_id, "mentee registered");
    Ok(())
}
