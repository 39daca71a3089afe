use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method};
use axum::middleware::Next;
use axum::response::Response;
use domain::auth::{ApiKeyAuth, Role};
use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::errors::ApiError;

/// Headers checked for the key, in order.
pub const API_KEY_HEADERS: [&str; 2] = ["api_key", "x-api-key"];

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ApiKeyAuth,
}

fn presented_key(headers: &HeaderMap) -> Option<String> {
    API_KEY_HEADERS
        .iter()
        .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
        .map(str::to_string)
}

/// Reads need any valid key; writes need an admin key.
fn required_role(method: &Method) -> Role {
    if *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS {
        Role::User
    } else {
        Role::Admin
    }
}

/// Rejects requests without a key granting the role the method needs, and
/// stores the resolved principal in request extensions.
pub async fn require_api_key(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = presented_key(req.headers());
    let required = required_role(req.method());
    let principal = state.auth.authorize(key.as_deref(), required).await?;
    debug!(
        username = %principal.username,
        role = %principal.role,
        method = %req.method(),
        path = %req.uri().path(),
        "request authorized"
    );
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn key_from_either_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(presented_key(&headers), None);
        headers.insert("x-api-key", HeaderValue::from_static("k2"));
        assert_eq!(presented_key(&headers).as_deref(), Some("k2"));
        headers.insert("api_key", HeaderValue::from_static("k1"));
        assert_eq!(presented_key(&headers).as_deref(), Some("k1"));
    }

    #[test]
    fn writes_require_admin() {
        assert_eq!(required_role(&Method::GET), Role::User);
        assert_eq!(required_role(&Method::POST), Role::Admin);
        assert_eq!(required_role(&Method::PUT), Role::Admin);
        assert_eq!(required_role(&Method::DELETE), Role::Admin);
    }
}
