use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{ApiConfig, config::Environment};

/// Settings needed to issue and verify access tokens
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
}

#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub auth: AuthConfig,
    pub environment: Environment,
    pub bcrypt_cost: u32,
}

impl ApiState {
    pub fn new(config: &ApiConfig, pool: PgPool) -> Self {
        Self {
            pool,
            auth: AuthConfig {
                jwt_secret: config.jwt_secret.clone(),
                jwt_expiry_hours: config.jwt_expiry_hours,
            },
            environment: config.env.clone(),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.auth.clone()
    }
}
