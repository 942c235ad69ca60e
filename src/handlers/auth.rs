use crate::error::{AppError, AppResult};
use crate::models::{Identity, UserRole};
use crate::response::ApiResponse;
use axum::response::IntoResponse;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    /// User ID assigned by the identity provider
    pub id: String,
    /// Display name
    pub name: String,
    /// student, admin or superadmin
    pub role: UserRole,
    /// Whether staff-only routes are open to this user
    pub is_staff: bool,
}

impl From<Identity> for MeResponse {
    fn from(identity: Identity) -> Self {
        Self {
            is_staff: identity.is_staff(),
            id: identity.id,
            name: identity.name,
            role: identity.role,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Current identity", body = MeResponse),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "auth"
)]
pub async fn get_current_user(identity: Identity) -> AppResult<impl IntoResponse> {
    Ok(ApiResponse::ok(MeResponse::from(identity)))
}
