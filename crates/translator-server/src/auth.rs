// crates/translator-server/src/auth.rs
// ============================================================================
// Module: Admin Authn/Authz
// Description: Authentication for administrative translator requests.
// Purpose: Provide fail-closed local-only and bearer token policies.
// Dependencies: translator-config, sha2, subtle, thiserror
// ============================================================================

//! ## Overview
//! Admin routes (and the public insert route when protected) are authorized
//! through [`AdminAuthz`]. The default policy follows `server.auth`:
//! `local_only` admits loopback peers, `bearer_token` requires an
//! `Authorization: Bearer` header matching a configured token. Tokens are
//! compared in constant time and only their SHA-256 fingerprint is logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::IpAddr;

use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use translator_config::ServerAuthConfig;
use translator_config::ServerAuthMode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted authorization header size.
const MAX_AUTH_HEADER_BYTES: usize = 8 * 1024;

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Per-request context used for auth decisions.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Peer IP address when available.
    pub peer_ip: Option<IpAddr>,
    /// Authorization header value.
    pub auth_header: Option<String>,
    /// Optional request identifier for auditing.
    pub request_id: Option<String>,
}

impl RequestContext {
    /// Builds an HTTP request context.
    #[must_use]
    pub const fn http(peer_ip: Option<IpAddr>, auth_header: Option<String>) -> Self {
        Self {
            peer_ip,
            auth_header,
            request_id: None,
        }
    }

    /// Returns a copy with the request identifier set.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Returns true when the peer IP is loopback.
    #[must_use]
    pub fn peer_is_loopback(&self) -> bool {
        self.peer_ip.is_some_and(|ip| ip.is_loopback())
    }
}

// ============================================================================
// SECTION: Auth Context
// ============================================================================

/// Authenticated caller context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Authentication method.
    pub method: AuthMethod,
    /// Token fingerprint for bearer auth (sha256 hex).
    pub token_fingerprint: Option<String>,
}

impl AuthContext {
    /// Returns the method label used in audit events.
    #[must_use]
    pub const fn method_label(&self) -> &'static str {
        self.method.label()
    }
}

/// Authentication method used for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Loopback access.
    Local,
    /// Bearer token authentication.
    BearerToken,
}

impl AuthMethod {
    /// Returns a stable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::BearerToken => "bearer_token",
        }
    }
}

/// Administrative actions subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    /// List entries.
    List,
    /// View every locale of one key.
    Edit,
    /// Save every locale of one key.
    Save,
    /// Remove one entry.
    Remove,
    /// Insert through the public route.
    Insert,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authentication or authorization errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Missing or invalid authentication.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    /// Caller is authenticated but not authorized.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl AuthError {
    /// Returns the error kind label used in responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "unauthenticated",
            Self::Unauthorized(_) => "unauthorized",
        }
    }
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Authn/authz interface for administrative requests.
pub trait AdminAuthz: Send + Sync {
    /// Authorize a request. Returns an authenticated context on success.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the caller is not admitted.
    fn authorize(&self, ctx: &RequestContext, action: AdminAction)
    -> Result<AuthContext, AuthError>;
}

// ============================================================================
// SECTION: Default Policy
// ============================================================================

/// Default authz implementation derived from server config.
#[derive(Debug, Clone)]
pub struct DefaultAdminAuthz {
    /// Configured auth mode.
    mode: ServerAuthMode,
    /// Accepted bearer tokens.
    bearer_tokens: Vec<String>,
}

impl DefaultAdminAuthz {
    /// Builds a default authz policy from server auth configuration.
    #[must_use]
    pub fn from_config(config: Option<&ServerAuthConfig>) -> Self {
        let mode = config.map_or(ServerAuthMode::LocalOnly, |cfg| cfg.mode);
        let bearer_tokens = config.map(|cfg| cfg.bearer_tokens.clone()).unwrap_or_default();
        Self {
            mode,
            bearer_tokens,
        }
    }

    /// Builds a bearer token policy.
    #[must_use]
    pub fn bearer(tokens: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            mode: ServerAuthMode::BearerToken,
            bearer_tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl AdminAuthz for DefaultAdminAuthz {
    fn authorize(
        &self,
        ctx: &RequestContext,
        _action: AdminAction,
    ) -> Result<AuthContext, AuthError> {
        match self.mode {
            ServerAuthMode::LocalOnly => authorize_local_only(ctx),
            ServerAuthMode::BearerToken => authorize_bearer(ctx, &self.bearer_tokens),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Admits loopback peers.
fn authorize_local_only(ctx: &RequestContext) -> Result<AuthContext, AuthError> {
    if ctx.peer_is_loopback() {
        Ok(AuthContext {
            method: AuthMethod::Local,
            token_fingerprint: None,
        })
    } else {
        Err(AuthError::Unauthenticated("local-only mode requires loopback access".to_string()))
    }
}

/// Admits callers presenting a configured bearer token.
fn authorize_bearer(ctx: &RequestContext, tokens: &[String]) -> Result<AuthContext, AuthError> {
    let token = parse_bearer_token(ctx.auth_header.as_deref())?;
    let matched = tokens
        .iter()
        .fold(false, |found, candidate| found | constant_time_eq_str(candidate, &token));
    if !matched {
        return Err(AuthError::Unauthenticated("invalid bearer token".to_string()));
    }
    Ok(AuthContext {
        method: AuthMethod::BearerToken,
        token_fingerprint: Some(token_fingerprint(&token)),
    })
}

/// Extracts the token from a `Bearer` authorization header.
pub(crate) fn parse_bearer_token(auth_header: Option<&str>) -> Result<String, AuthError> {
    let header = auth_header
        .ok_or_else(|| AuthError::Unauthenticated("missing authorization".to_string()))?;
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(AuthError::Unauthenticated("authorization header too large".to_string()));
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::Unauthenticated("invalid authorization header".to_string()));
    }
    Ok(token.to_string())
}

/// Compares two strings in constant time.
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Returns the lowercase hex SHA-256 of a token.
fn token_fingerprint(token: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let digest = Sha256::digest(token.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
