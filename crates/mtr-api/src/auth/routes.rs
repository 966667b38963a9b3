use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use mtr_db::repositories::user as user_repo;

use super::{
    jwt,
    middleware::AuthUser,
    models::{LoginRequest, LoginResponse, MeResponse, UserResponse},
    service,
};
use crate::{ApiState, error::ApiError, metrics, middleware::rate_limit};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    // Password login is the brute-force target, so it gets the strict limit
    let login_routes = Router::new()
        .route("/auth/login", post(login))
        .layer(make_rate_limit_layer!(
            rate_limit::AUTH_REPLENISH_MS,
            rate_limit::AUTH_BURST_SIZE
        ));

    let session_routes = Router::new()
        .route("/auth/me", get(auth_me))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new().merge(login_routes).merge(session_routes)
}

async fn login(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let user = match service::authenticate(&state.pool, &email, &request.password).await {
        Ok(user) => user,
        Err(e) => {
            metrics::record_auth_event("login", false);
            return Err(e);
        }
    };

    let token = jwt::generate_jwt_token(
        user.id,
        user.email.clone(),
        user.role,
        &state.auth.jwt_secret,
        state.auth.jwt_expiry_hours,
    )?;

    let profile = user_repo::find_profile_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("profile missing for user {}", user.id)))?;

    metrics::record_auth_event("login", true);
    tracing::info!(user_id = %user.id, role = %user.role, "user logged in");

    Ok(Json(LoginResponse {
        success: true,
        message: "Logged in successfully".to_string(),
        token,
        user: UserResponse::from(profile),
    }))
}

async fn auth_me(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<MeResponse>, ApiError> {
    let profile = user_repo::find_profile_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(MeResponse {
        success: true,
        user: UserResponse::from(profile),
    }))
}
