use mtr_db::repositories::user as user_repo;
use mtr_domain::Role;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::error::ApiError;

/// Message for any failed login, so callers cannot tell which emails exist
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Account that passed a password check
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

const USERS_EMAIL_CONSTRAINT: &str = "users_email_key";

/// Fields for a new `users` row
#[derive(Debug)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: Role,
}

/// Insert an account, reporting a taken email as `Conflict(duplicate_message)`
///
/// Callers check `email_exists` first; the unique constraint still catches
/// concurrent sign-ups with the same address.
pub async fn create_account<'e, E>(
    executor: E,
    account: NewAccount<'_>,
    duplicate_message: &str,
) -> Result<Uuid, ApiError>
where
    E: Executor<'e, Database = Postgres>,
{
    user_repo::create_user(
        executor,
        account.email,
        account.password_hash,
        account.first_name,
        account.last_name,
        account.role.as_str(),
    )
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.constraint() == Some(USERS_EMAIL_CONSTRAINT) => {
            ApiError::Conflict(duplicate_message.to_string())
        }
        _ => ApiError::Database(e),
    })
}

/// Hash a password off the async runtime
pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Verify a password off the async runtime
pub async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(valid)
}

/// Check an email/password pair against the stored bcrypt hash
pub async fn authenticate(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<AuthenticatedUser, ApiError> {
    let credentials = user_repo::find_credentials_by_email(pool, email)
        .await?
        .ok_or_else(|| ApiError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(password.to_string(), credentials.password_hash).await? {
        return Err(ApiError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    Ok(AuthenticatedUser {
        id: credentials.id,
        email: credentials.email,
        role: credentials.role.parse()?,
    })
}
