//! Current-user handler.

use axum::{Extension, Json};
use serde::Serialize;

use crate::middleware::auth::SessionUser;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// `GET /api/me` — echo the verified session claims.
pub async fn me_handler(Extension(SessionUser(claims)): Extension<SessionUser>) -> Json<MeResponse> {
    Json(MeResponse {
        id: claims.sub,
        email: claims.email,
        name: claims.name,
    })
}
