//! JWT bearer tokens: issue on login, validate on every authenticated request.

use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use muster_domain::id::UserId;
use muster_domain::user::UserRole;
use serde::{Deserialize, Serialize};

/// Identity carried by a validated token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: UserId,
    pub role: UserRole,
    pub exp: u64,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub exp: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `sub` | `sub` | decimal string | user id |
/// | `role` | custom | `u8` wire value | see [`UserRole::from_u8`] |
/// | `exp` | `exp` | seconds since epoch | token expiration |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub role: u8,
    pub exp: u64,
}

/// HS256 signing material plus token lifetime. Cheap to clone.
#[derive(Clone)]
pub struct TokenKey {
    inner: Arc<KeyInner>,
}

struct KeyInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenKey {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            inner: Arc::new(KeyInner {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                ttl_secs,
            }),
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.inner.ttl_secs
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKey")
            .field("ttl_secs", &self.inner.ttl_secs)
            .finish_non_exhaustive()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

// ── Issue ────────────────────────────────────────────────────────────────

pub fn issue_token(key: &TokenKey, user_id: UserId, role: UserRole) -> Result<IssuedToken, AuthError> {
    issue_token_at(key, user_id, role, unix_now())
}

/// Sign a token as if issued at `issued_at` (seconds since epoch).
pub fn issue_token_at(
    key: &TokenKey,
    user_id: UserId,
    role: UserRole,
    issued_at: u64,
) -> Result<IssuedToken, AuthError> {
    let exp = issued_at + key.inner.ttl_secs;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        role: role.as_u8(),
        exp,
    };
    let token = encode(&Header::new(Algorithm::HS256), &claims, &key.inner.encoding)
        .map_err(AuthError::Signing)?;
    Ok(IssuedToken { token, exp })
}

// ── Validate ─────────────────────────────────────────────────────────────

/// Decode and validate a bearer token.
///
/// HS256 only, `exp` and `sub` required, default 60s leeway on `exp`.
pub fn validate_token(token: &str, key: &TokenKey) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(token, &key.inner.decoding, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::Malformed,
        }
    })?;

    let claims = data.claims;
    let user_id = claims
        .sub
        .parse::<UserId>()
        .map_err(|_| AuthError::Malformed)?;
    let role = UserRole::from_u8(claims.role).ok_or(AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        role,
        exp: claims.exp,
    })
}
