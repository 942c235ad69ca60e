use crate::{
    config::jwt::JwtConfig,
    error::{AppError, AppResult},
    models::Identity,
    utils::jwt::decode_jwt,
};
use axum::{
    extract::{FromRequestParts, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
    Extension,
};
use std::sync::Arc;

/// Identity middleware
///
/// Verifies the bearer token minted by the identity provider and stores the
/// caller's `Identity` in request extensions. Requests without a valid token
/// never reach a handler.
pub async fn auth_middleware(
    Extension(jwt): Extension<Arc<JwtConfig>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&headers).ok_or(AppError::Unauthorized)?;

    let claims = decode_jwt(&jwt, &token)?;

    let identity = Identity::from(claims);
    tracing::debug!(user_id = %identity.id, role = %identity.role, "identity resolved");
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let token = auth_header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Admins and superadmins only.
pub fn require_staff(identity: &Identity) -> AppResult<()> {
    if identity.is_staff() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use axum::http::{header::AUTHORIZATION, HeaderValue};

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(
            extract_bearer_token(&headers("Bearer abc.def")),
            Some("abc.def".to_string())
        );
        assert_eq!(extract_bearer_token(&headers("Bearer ")), None);
        assert_eq!(extract_bearer_token(&headers("Basic dXNlcg==")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn only_staff_pass_require_staff() {
        let mut identity = Identity {
            id: "1".into(),
            name: "John Student".into(),
            role: UserRole::Student,
        };
        assert!(matches!(require_staff(&identity), Err(AppError::Forbidden)));
        identity.role = UserRole::Superadmin;
        assert!(require_staff(&identity).is_ok());
    }
}
