//! Bearer-token authentication and the per-request session.
//!
//! Tokens are HS256 JWTs issued by the identity provider and verified against
//! the shared secret. The session is an explicit value extracted per request:
//! identity from the token, roles re-read from `user_roles` so a role change
//! takes effect on the next request.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use mt_core::{Role, RoleSet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized)
}

/// The signed-in user for one request.
pub struct Session {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub roles: RoleSet,
}

impl Session {
    pub fn require(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if self.roles.has_any(allowed) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        self.require(&[Role::Admin])
    }

    /// Any assigned role grants read access to the shared record views.
    pub fn require_member(&self) -> Result<(), ApiError> {
        if self.roles.is_empty() {
            Err(ApiError::Forbidden)
        } else {
            Ok(())
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let claims = verify_token(token, &state.config.jwt_secret)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthorized)?;

        let names: Vec<String> = sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&state.db)
            .await?;

        Ok(Session {
            user_id,
            email: claims.email,
            roles: RoleSet::from_names(names.iter().map(String::as_str)),
        })
    }
}
