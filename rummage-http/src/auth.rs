//! The admin gate: the one question the engine asks the auth layer is
//! "is this caller an admin?". Real deployments bridge this trait to their
//! identity provider; the reference implementation compares a bearer token.

use axum::http::HeaderMap;

pub trait AdminGate: Send + Sync {
    fn is_admin(&self, token: Option<&str>) -> bool;
}

/// Grants admin when the presented token equals the configured key.
pub struct TokenAdminGate {
    admin_key: String,
}

impl TokenAdminGate {
    pub fn new(admin_key: impl Into<String>) -> Self {
        TokenAdminGate {
            admin_key: admin_key.into(),
        }
    }
}

impl AdminGate for TokenAdminGate {
    fn is_admin(&self, token: Option<&str>) -> bool {
        !self.admin_key.is_empty() && token == Some(self.admin_key.as_str())
    }
}

/// Development-only gate that admits everyone. The server logs a warning
/// when it falls back to this.
pub struct OpenGate;

impl AdminGate for OpenGate {
    fn is_admin(&self, _token: Option<&str>) -> bool {
        true
    }
}

/// Pull the caller's token from `Authorization: Bearer <token>` or the
/// `x-admin-key` header.
pub fn caller_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        if let Some(token) = value.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token);
            }
        }
    }
    headers
        .get("x-admin-key")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
