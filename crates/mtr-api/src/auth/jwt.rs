use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use mtr_domain::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id as string
    pub email: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// Generate a signed access token for a user
pub fn generate_jwt_token(
    user_id: Uuid,
    email: String,
    role: Role,
    jwt_secret: &str,
    expiry_hours: i64,
) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email,
        role,
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::hours(expiry_hours)).timestamp() as usize,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode an access token
pub fn verify_jwt_token(token: &str, jwt_secret: &str) -> Result<Claims, ApiError> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Auth("Invalid or expired token".to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_jwt_secret_minimum_32_characters_long";

    #[test]
    fn test_generate_and_verify_jwt_token() {
        let user_id = Uuid::new_v4();
        let token = generate_jwt_token(
            user_id,
            "mentor@example.com".to_string(),
            Role::Mentor,
            SECRET,
            24,
        )
        .expect("Failed to generate token");

        let claims = verify_jwt_token(&token, SECRET).expect("Failed to verify token");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "mentor@example.com");
        assert_eq!(claims.role, Role::Mentor);
        let lifetime = claims.exp - claims.iat;
        assert!(
            (86390..=86410).contains(&lifetime),
            "Token should expire in about 24 hours, got {lifetime} seconds"
        );
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = generate_jwt_token(
            Uuid::new_v4(),
            "mentee@example.com".to_string(),
            Role::Mentee,
            SECRET,
            1,
        )
        .expect("Failed to generate token");

        match verify_jwt_token(&token, "wrong_jwt_secret_minimum_32_characters_long") {
            Err(ApiError::Auth(msg)) => assert!(msg.contains("Invalid or expired token")),
            other => panic!("Expected Auth error, got {other:?}"),
        }
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = generate_jwt_token(
            Uuid::new_v4(),
            "mentee@example.com".to_string(),
            Role::Mentee,
            SECRET,
            -2,
        )
        .expect("Failed to generate token");

        assert!(matches!(verify_jwt_token(&token, SECRET), Err(ApiError::Auth(_))));
    }

    #[test]
    fn test_verify_garbage_token() {
        assert!(matches!(
            verify_jwt_token("invalid.jwt.token", SECRET),
            Err(ApiError::Auth(_))
        ));
    }
}
