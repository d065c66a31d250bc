//! Business logic services

pub mod auth;
pub mod catalog;
pub mod members;
pub mod tokens;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub tokens: tokens::TokenService,
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: &AuthConfig) -> Self {
        let tokens = tokens::TokenService::new(auth_config);
        Self {
            auth: auth::AuthService::new(repository.clone(), tokens.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            members: members::MembersService::new(repository),
            tokens,
        }
    }
}
