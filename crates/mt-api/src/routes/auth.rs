//! Authentication routes.
//!
//! Tokens are issued by the external identity provider; this surface only
//! reports who the bearer is and which roles they hold.

use axum::Json;
use mt_core::Role;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::Session;

#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub roles: Vec<Role>,
}

pub async fn me(session: Session) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: session.user_id,
        email: session.email,
        roles: session.roles.roles().to_vec(),
    })
}
