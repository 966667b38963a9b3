use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_extra::extract::WithRejection;
use mtr_db::repositories::{mentor as mentor_repo, user as user_repo};
use mtr_domain::MentorRegistration;
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
pub const DUPLICATE_MENTOR: &str = "An account with this email already exists";

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .route("/mentors/register", post(register))
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

/// Sign up a mentor or trainer together with an empty mentor profile
async fn register(
    State(state): State<ApiState>,
    WithRejection(Json(registration), _): WithRejection<Json<MentorRegistration>, ApiError>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let role = registration.role;
    let result = create_mentor(&state, registration).await;
    metrics::record_registration_event(role.as_str(), result.is_ok());
    result?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful".to_string(),
        }),
    ))
}

async fn create_mentor(state: &ApiState, registration: MentorRegistration) -> Result<(), ApiError> {
    validation::validate_mentor_registration(&registration)?;

    let email = registration.email.trim().to_lowercase();
    if user_repo::email_exists(&state.pool, &email).await? {
        return Err(ApiError::Conflict(DUPLICATE_MENTOR.to_string()));
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
            role: registration.role,
        },
        DUPLICATE_MENTOR,
    )
    .await?;
    mentor_repo::create_profile(&mut *tx, user_id, registration.headline.trim()).await?;

    tx.commit().await?;

    tracing::info!(%user_id, role = %registration.role, "mentor registered");
    Ok(())
}
