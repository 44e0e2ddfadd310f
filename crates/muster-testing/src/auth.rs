//! Mock auth helpers for integration tests.
//!
//! Routes authenticate with `Authorization: Bearer <jwt>`. `MockAuth` signs a
//! real token for an arbitrary identity so tests skip the login round trip.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use muster_auth_types::token::{TokenKey, issue_token};
use muster_domain::id::UserId;
use muster_domain::user::UserRole;

pub struct MockAuth {
    pub user_id: UserId,
    pub role: UserRole,
    token: String,
}

impl MockAuth {
    /// Sign a token for `user_id`/`role` with the same key the app under test uses.
    pub fn new(key: &TokenKey, user_id: UserId, role: UserRole) -> Self {
        let token = issue_token(key, user_id, role)
            .unwrap_or_else(|e| panic!("MockAuth: signing failed: {e}"))
            .token;
        Self {
            user_id,
            role,
            token,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn header_name(&self) -> HeaderName {
        AUTHORIZATION
    }

    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token))
            .unwrap_or_else(|e| panic!("MockAuth: invalid header value: {e}"))
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(self.header_name(), self.header_value());
        map
    }
}
