// crates/translator-server/src/audit.rs
// ============================================================================
// Module: Request Audit Logging
// Description: Structured audit events for translator HTTP requests.
// Purpose: Emit JSON-line request records without payload contents.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every handled request produces one [`RequestAuditEvent`]. Events carry the
//! route, outcome, and caller identity but never translation text or bearer
//! tokens. Sinks write JSON lines to stderr or an append-only file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::routes::RouteKind;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Route that handled the request.
    pub route: RouteKind,
    /// HTTP status returned.
    pub status: u16,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Auth method label when the route required auth.
    pub auth_method: Option<&'static str>,
    /// Bearer token fingerprint (sha256).
    pub token_fingerprint: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

/// Inputs required to construct an audit event.
pub struct RequestAuditEventParams {
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Peer IP address if known.
    pub peer_ip: Option<String>,
    /// Route that handled the request.
    pub route: RouteKind,
    /// HTTP status returned.
    pub status: u16,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Auth method label.
    pub auth_method: Option<&'static str>,
    /// Bearer token fingerprint.
    pub token_fingerprint: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

impl RequestAuditEvent {
    /// Builds an event stamped with the current time.
    #[must_use]
    pub fn new(params: RequestAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "translator_request",
            timestamp_ms,
            request_id: params.request_id,
            peer_ip: params.peer_ip,
            route: params.route,
            status: params.status,
            error_kind: params.error_kind,
            auth_method: params.auth_method,
            token_fingerprint: params.token_fingerprint,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for request events.
pub trait AuditSink: Send + Sync {
    /// Record a request audit event.
    fn record(&self, event: &RequestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// Output file guarded for concurrent writers.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens (or creates) an append-only audit log.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] when the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        let Ok(payload) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
