//! Signup and login

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{LoginRequest, NewUser, Principal, SignupRequest, User},
    repository::Repository,
};

use super::tokens::TokenService;

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(repository: Repository, tokens: TokenService) -> Self {
        Self { repository, tokens }
    }

    /// Register a new user with the role the caller asked for
    pub async fn signup(&self, request: SignupRequest) -> AppResult<User> {
        request.validate()?;

        if self
            .repository
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let user = self
            .repository
            .users
            .insert(NewUser {
                username: request.username,
                password: hash_password(&request.password).await?,
                role: request.role,
            })
            .await?;

        tracing::info!(id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Authenticate username, secret and claimed role, then issue a token
    /// and store it on the user record that matched
    pub async fn login(&self, request: LoginRequest) -> AppResult<(String, Principal)> {
        // Usernames are not guaranteed unique, so every candidate is checked
        let candidates = self
            .repository
            .users
            .find_all_by_username_and_role(&request.username, request.role)
            .await?;

        let mut matched = None;
        for user in candidates {
            if verify_password(user.password.clone(), request.password.clone()).await? {
                matched = Some(user);
                break;
            }
        }
        let user = matched.ok_or_else(|| AppError::Authentication("User not found".to_string()))?;

        let principal = Principal {
            username: user.username,
            role: user.role,
        };
        let token = self.tokens.issue(&principal)?;

        // Not rolled back: the token stays valid even if this write fails
        if !self.repository.users.set_last_token(user.id, &token).await? {
            return Err(AppError::Internal(format!(
                "User {} vanished before the token was stored",
                user.id
            )));
        }

        tracing::info!(id = %user.id, username = %principal.username, role = %principal.role, "Login successful");
        Ok((token, principal))
    }
}

/// Hash a secret using Argon2, off the async worker threads
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// Check a secret against a stored hash
async fn verify_password(hash: String, password: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?
}
