//! Bearer token issuance and verification

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Principal, Role},
};

/// JWT claims; there is deliberately no `exp`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub iat: i64,
}

/// Signs and verifies HS256 tokens with the process-wide secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Produce a signed token for `principal`. Persisting it is up to the caller.
    pub fn issue(&self, principal: &Principal) -> AppResult<String> {
        let claims = TokenClaims {
            username: principal.username.clone(),
            role: principal.role,
            iat: Utc::now().timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Decode a token back into the principal it was issued for.
    ///
    /// The result is not checked against the credential store: a role change
    /// only shows up once the user logs in again.
    pub fn verify(&self, token: &str) -> AppResult<Principal> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            AppError::forbidden("Forbidden")
        })?;

        Ok(Principal {
            username: data.claims.username,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: secret.to_string(),
        })
    }

    fn alice() -> Principal {
        Principal {
            username: "alice".to_string(),
            role: Role::Member,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service("secret");
        let token = tokens.issue(&alice()).unwrap();

        assert_eq!(tokens.verify(&token).unwrap(), alice());
        // Verification has no side effects
        assert_eq!(tokens.verify(&token).unwrap(), tokens.verify(&token).unwrap());
    }

    #[test]
    fn test_other_secret_is_forbidden() {
        let token = service("secret").issue(&alice()).unwrap();
        assert!(matches!(
            service("other").verify(&token),
            Err(AppError::Authorization { role: None, .. })
        ));
    }

    #[test]
    fn test_malformed_token_is_forbidden() {
        let tokens = service("secret");
        for token in ["", "abc", "a.b.c", "Bearer"] {
            assert!(matches!(tokens.verify(token), Err(AppError::Authorization { .. })));
        }
    }

    #[test]
    fn test_tampered_role_is_rejected() {
        let tokens = service("secret");
        let token = tokens.issue(&alice()).unwrap();

        let forged = TokenClaims {
            username: "alice".to_string(),
            role: Role::Librarian,
            iat: 0,
        };
        let forged = encode(
            &Header::new(Algorithm::HS256),
            &forged,
            &EncodingKey::from_secret(b"guess"),
        )
        .unwrap();

        // Keep the genuine signature, swap in the forged payload
        let genuine: Vec<&str> = token.split('.').collect();
        let payload = forged.split('.').nth(1).unwrap();
        let spliced = format!("{}.{}.{}", genuine[0], payload, genuine[2]);
        assert!(tokens.verify(&spliced).is_err());
    }

    #[test]
    fn test_old_tokens_stay_valid() {
        let tokens = service("secret");
        let first = tokens.issue(&alice()).unwrap();
        let _second = tokens.issue(&alice()).unwrap();
        assert!(tokens.verify(&first).is_ok());
    }
}
