use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Claims of an access token issued by the identity provider. `sub` is the
/// user id every mood entry and metrics snapshot is keyed by.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub aud: String,
    #[serde(default)]
    pub email: Option<String>,
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.jwt_audience.as_str()]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Access token rejected");
        AppError::Unauthorized
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config() -> Config {
        Config {
            database_url: String::new(),
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: vec![],
            jwt_secret: "test-secret".into(),
            jwt_audience: "authenticated".into(),
            metrics_window_days: 90,
            entries_default_days: 30,
            trends_default_days: 90,
        }
    }

    fn token(secret: &str, aud: &str, exp_offset: Duration) -> (Uuid, String) {
        let sub = Uuid::new_v4();
        let claims = Claims {
            sub,
            exp: (Utc::now() + exp_offset).timestamp(),
            aud: aud.into(),
            email: Some("patient@example.com".into()),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        (sub, token)
    }

    #[test]
    fn test_verify_token_accepts_valid_token() {
        let (sub, token) = token("test-secret", "authenticated", Duration::minutes(5));
        let data = verify_token(&token, &test_config()).unwrap();
        assert_eq!(data.claims.sub, sub);
    }

    #[test]
    fn test_verify_token_rejects_wrong_secret() {
        let (_, token) = token("other-secret", "authenticated", Duration::minutes(5));
        assert!(matches!(
            verify_token(&token, &test_config()),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_verify_token_rejects_wrong_audience() {
        let (_, token) = token("test-secret", "anon", Duration::minutes(5));
        assert!(verify_token(&token, &test_config()).is_err());
    }

    #[test]
    fn test_verify_token_rejects_expired_token() {
        let (_, token) = token("test-secret", "authenticated", Duration::minutes(-10));
        assert!(verify_token(&token, &test_config()).is_err());
    }
}
