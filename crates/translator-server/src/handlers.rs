// crates/translator-server/src/handlers.rs
// ============================================================================
// Module: HTTP Handlers
// Description: Request handlers for the public and admin translator routes.
// Purpose: Translate HTTP requests into service calls and JSON replies.
// Dependencies: translator-core, axum, serde, serde_json, tokio
// ============================================================================

//! ## Overview
//! Handlers parse query strings and JSON bodies, authorize admin requests,
//! run the synchronous services in a blocking context, and record one audit
//! event per request. Errors are returned as
//! `{"error": {"kind": ..., "message": ...}}` with the status mapped from the
//! error kind.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::Query;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::json;
use translator_core::EntryFilter;
use translator_core::LocaleCode;
use translator_core::TranslationError;
use translator_core::TranslationKey;

use crate::audit::RequestAuditEvent;
use crate::audit::RequestAuditEventParams;
use crate::auth::AdminAction;
use crate::auth::AuthContext;
use crate::auth::AuthError;
use crate::auth::RequestContext;
use crate::routes::RouteKind;
use crate::server::ServerState;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of keys in one fetch request.
const MAX_FETCH_KEYS: usize = 256;
/// Maximum accepted request identifier length.
const MAX_REQUEST_ID_LENGTH: usize = 128;
/// Header carrying a caller-supplied request identifier.
const REQUEST_ID_HEADER: &str = "x-request-id";

// ============================================================================
// SECTION: Request Payloads
// ============================================================================

/// Query parameters for the public fetch route.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GetQuery {
    /// Single key.
    key: Option<String>,
    /// Comma-separated keys.
    keys: Option<String>,
    /// Requested locale; the default locale when omitted.
    locale: Option<String>,
}

/// Query parameters for the admin listing route.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    /// Locale filter.
    locale: Option<String>,
    /// Key prefix filter.
    prefix: Option<String>,
    /// Page size.
    limit: Option<usize>,
    /// Entries to skip.
    offset: Option<usize>,
}

/// Query parameters for the admin edit route.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EditQuery {
    /// Key to show.
    key: Option<String>,
}

/// Body of the public insert route.
#[derive(Debug, Deserialize)]
struct InsertBody {
    /// Translation key.
    key: TranslationKey,
    /// Locale code.
    locale: LocaleCode,
    /// Translated text.
    text: String,
}

/// Body of the admin save route.
#[derive(Debug, Deserialize)]
struct SaveBody {
    /// Translation key.
    key: TranslationKey,
    /// Text per locale.
    translations: BTreeMap<LocaleCode, String>,
}

/// Body of the admin remove route.
#[derive(Debug, Deserialize)]
struct RemoveBody {
    /// Translation key.
    key: TranslationKey,
    /// Locale code.
    locale: LocaleCode,
}

// ============================================================================
// SECTION: Replies
// ============================================================================

/// Handler outcome prior to serialization.
struct Reply {
    /// HTTP status.
    status: StatusCode,
    /// JSON body.
    body: Value,
    /// Error kind label for audit.
    error_kind: Option<&'static str>,
}

impl Reply {
    /// Successful reply.
    const fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            error_kind: None,
        }
    }

    /// Error reply with the standard envelope.
    fn error(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({"error": {"kind": kind, "message": message.into()}}),
            error_kind: Some(kind),
        }
    }

    /// Maps a service error onto a status code.
    fn from_translation_error(error: &TranslationError) -> Self {
        match error {
            TranslationError::Validation(_) => {
                Self::error(StatusCode::BAD_REQUEST, error.kind(), error.to_string())
            }
            TranslationError::NotFound {
                ..
            } => Self::error(StatusCode::NOT_FOUND, error.kind(), error.to_string()),
            TranslationError::Persistence(_) => Self::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                error.kind(),
                "translation store unavailable",
            ),
        }
    }

    /// Maps an auth failure onto a status code.
    fn from_auth_error(error: &AuthError) -> Self {
        let status = match error {
            AuthError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AuthError::Unauthorized(_) => StatusCode::FORBIDDEN,
        };
        Self::error(status, error.kind(), error.to_string())
    }

    /// Validation reply for malformed requests.
    fn invalid(message: impl Into<String>) -> Self {
        Self::error(StatusCode::BAD_REQUEST, "validation", message)
    }
}

/// Per-request bookkeeping shared by every handler.
struct Exchange<'a> {
    /// Shared server state.
    state: &'a ServerState,
    /// Caller context.
    ctx: RequestContext,
    /// Route being served.
    route: RouteKind,
    /// Request body size.
    request_bytes: usize,
    /// Auth context once authorized.
    auth: Option<AuthContext>,
}

impl<'a> Exchange<'a> {
    /// Starts an exchange for a route.
    fn new(state: &'a ServerState, peer: SocketAddr, headers: &HeaderMap, route: RouteKind) -> Self {
        Self {
            state,
            ctx: request_context(peer, headers),
            route,
            request_bytes: 0,
            auth: None,
        }
    }

    /// Authorizes an admin action, remembering the auth context.
    fn authorize(&mut self, action: AdminAction) -> Result<(), Reply> {
        match self.state.authz.authorize(&self.ctx, action) {
            Ok(auth) => {
                self.auth = Some(auth);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    route = self.route.label(),
                    peer = ?self.ctx.peer_ip,
                    error = %err,
                    "admin request denied"
                );
                Err(Reply::from_auth_error(&err))
            }
        }
    }

    /// Checks body size and decodes a JSON body.
    fn parse_body<T: DeserializeOwned>(
        &mut self,
        body: Result<Bytes, BytesRejection>,
    ) -> Result<T, Reply> {
        let bytes = body.map_err(|rejection| {
            let status = rejection.status();
            if status == StatusCode::PAYLOAD_TOO_LARGE {
                Reply::error(status, "payload_too_large", "request body too large")
            } else {
                Reply::error(status, "invalid_request", rejection.body_text())
            }
        })?;
        self.request_bytes = bytes.len();
        if bytes.len() > self.state.max_body_bytes {
            return Err(Reply::error(
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload_too_large",
                "request body too large",
            ));
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| Reply::invalid(format!("invalid json body: {err}")))
    }

    /// Serializes the reply and records the audit event.
    fn finish(self, reply: Reply) -> Response {
        let payload = serde_json::to_vec(&reply.body).unwrap_or_default();
        self.state.audit.record(&RequestAuditEvent::new(RequestAuditEventParams {
            request_id: self.ctx.request_id.clone(),
            peer_ip: self.ctx.peer_ip.map(|ip| ip.to_string()),
            route: self.route,
            status: reply.status.as_u16(),
            error_kind: reply.error_kind,
            auth_method: self.auth.as_ref().map(AuthContext::method_label),
            token_fingerprint: self.auth.and_then(|auth| auth.token_fingerprint),
            request_bytes: self.request_bytes,
            response_bytes: payload.len(),
        }));
        tracing::debug!(
            route = self.route.label(),
            status = reply.status.as_u16(),
            "translator request handled"
        );
        (reply.status, [(CONTENT_TYPE, HeaderValue::from_static("application/json"))], payload)
            .into_response()
    }
}

// ============================================================================
// SECTION: Public Handlers
// ============================================================================

/// Handles `GET {routes.get}`.
pub(crate) async fn handle_get(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    query: Result<Query<GetQuery>, QueryRejection>,
) -> Response {
    let exchange = Exchange::new(&state, peer, &headers, RouteKind::Get);
    let reply = match query {
        Ok(Query(query)) => fetch_reply(&state, query),
        Err(rejection) => Reply::invalid(rejection.body_text()),
    };
    exchange.finish(reply)
}

/// Resolves a fetch query into a reply.
fn fetch_reply(state: &ServerState, query: GetQuery) -> Reply {
    let fetch = &state.services.fetch;
    let locale = query
        .locale
        .map_or_else(|| fetch.settings().default_locale.clone(), LocaleCode::new);
    match (query.key, query.keys) {
        (Some(key), None) => {
            let key = TranslationKey::new(key);
            match run_blocking(|| fetch.fetch_one(&key, &locale)) {
                Ok(Some(resolved)) => Reply::ok(json!({
                    "key": key,
                    "locale": locale,
                    "text": resolved.text,
                    "resolved_locale": resolved.locale,
                })),
                Ok(None) => Reply::from_translation_error(&TranslationError::NotFound {
                    key,
                    locale,
                }),
                Err(err) => Reply::from_translation_error(&err),
            }
        }
        (None, Some(keys)) => {
            let keys: BTreeSet<TranslationKey> =
                keys.split(',').map(TranslationKey::from).collect();
            if keys.len() > MAX_FETCH_KEYS {
                return Reply::invalid(format!("at most {MAX_FETCH_KEYS} keys per request"));
            }
            match run_blocking(|| fetch.fetch(&keys, &locale)) {
                Ok(translations) => Reply::ok(json!({
                    "locale": locale,
                    "translations": translations,
                })),
                Err(err) => Reply::from_translation_error(&err),
            }
        }
        _ => Reply::invalid("exactly one of key or keys is required"),
    }
}

/// Handles `POST {routes.insert}`.
pub(crate) async fn handle_insert(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let mut exchange = Exchange::new(&state, peer, &headers, RouteKind::Insert);
    let reply = (|| {
        if state.protect_insert {
            exchange.authorize(AdminAction::Insert)?;
        }
        let body: InsertBody = exchange.parse_body(body)?;
        run_blocking(|| state.services.insert.insert(&body.key, &body.locale, &body.text))
            .map_err(|err| Reply::from_translation_error(&err))?;
        Ok::<_, Reply>(Reply::ok(json!({"status": "ok"})))
    })();
    exchange.finish(reply.unwrap_or_else(|reply| reply))
}

/// Handles `GET /health`.
pub(crate) async fn handle_health() -> impl IntoResponse {
    axum::Json(json!({"status": "ok"}))
}

// ============================================================================
// SECTION: Admin Handlers
// ============================================================================

/// Handles `GET {routes.admin_list}`.
pub(crate) async fn handle_admin_list(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let mut exchange = Exchange::new(&state, peer, &headers, RouteKind::AdminList);
    let reply = (|| {
        exchange.authorize(AdminAction::List)?;
        let Query(query) = query.map_err(|rejection| Reply::invalid(rejection.body_text()))?;
        let filter = EntryFilter {
            locale: query.locale.map(LocaleCode::new),
            key_prefix: query.prefix.filter(|prefix| !prefix.is_empty()),
            limit: query.limit,
            offset: query.offset.unwrap_or_default(),
        };
        let admin = &state.services.admin;
        let entries = run_blocking(|| admin.list(&filter))
            .map_err(|err| Reply::from_translation_error(&err))?;
        let settings = admin.settings();
        Ok::<_, Reply>(Reply::ok(json!({
            "entries": entries,
            "supported_locales": settings.supported_locales,
            "default_locale": settings.default_locale,
        })))
    })();
    exchange.finish(reply.unwrap_or_else(|reply| reply))
}

/// Handles `GET {routes.admin_edit}`.
pub(crate) async fn handle_admin_edit(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    query: Result<Query<EditQuery>, QueryRejection>,
) -> Response {
    let mut exchange = Exchange::new(&state, peer, &headers, RouteKind::AdminEdit);
    let reply = (|| {
        exchange.authorize(AdminAction::Edit)?;
        let Query(query) = query.map_err(|rejection| Reply::invalid(rejection.body_text()))?;
        let key = TranslationKey::new(query.key.ok_or_else(|| Reply::invalid("key is required"))?);
        let translations = run_blocking(|| state.services.admin.translations_for_key(&key))
            .map_err(|err| Reply::from_translation_error(&err))?;
        Ok::<_, Reply>(Reply::ok(json!({"key": key, "translations": translations})))
    })();
    exchange.finish(reply.unwrap_or_else(|reply| reply))
}

/// Handles `POST {routes.admin_save}`.
pub(crate) async fn handle_admin_save(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let mut exchange = Exchange::new(&state, peer, &headers, RouteKind::AdminSave);
    let reply = (|| {
        exchange.authorize(AdminAction::Save)?;
        let body: SaveBody = exchange.parse_body(body)?;
        let saved = run_blocking(|| state.services.insert.save_key(&body.key, &body.translations))
            .map_err(|err| Reply::from_translation_error(&err))?;
        Ok::<_, Reply>(Reply::ok(json!({"status": "ok", "saved": saved})))
    })();
    exchange.finish(reply.unwrap_or_else(|reply| reply))
}

/// Handles `POST {routes.admin_remove}`.
pub(crate) async fn handle_admin_remove(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let mut exchange = Exchange::new(&state, peer, &headers, RouteKind::AdminRemove);
    let reply = (|| {
        exchange.authorize(AdminAction::Remove)?;
        let body: RemoveBody = exchange.parse_body(body)?;
        run_blocking(|| state.services.admin.remove(&body.key, &body.locale))
            .map_err(|err| Reply::from_translation_error(&err))?;
        Ok::<_, Reply>(Reply::ok(json!({"status": "ok"})))
    })();
    exchange.finish(reply.unwrap_or_else(|reply| reply))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the auth context for an HTTP request.
fn request_context(peer: SocketAddr, headers: &HeaderMap) -> RequestContext {
    let auth_header =
        headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()).map(str::to_string);
    let context = RequestContext::http(Some(peer.ip()), auth_header);
    match headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty() && value.len() <= MAX_REQUEST_ID_LENGTH)
    {
        Some(request_id) => context.with_request_id(request_id),
        None => context,
    }
}

/// Runs a synchronous service call, shifting to a blocking context when available.
fn run_blocking<T>(call: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(call)
        }
        _ => call(),
    }
}
