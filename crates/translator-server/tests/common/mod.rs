// crates/translator-server/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared server builders and audit capture for HTTP tests.
// Purpose: Spawn routers on ephemeral loopback ports.
// Dependencies: translator-core, translator-server, tokio
// ============================================================================

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;

use tokio::net::TcpListener;
use translator_core::I18nSettings;
use translator_core::InMemoryTranslationStore;
use translator_core::LocaleCode;
use translator_core::SharedTranslationStore;
use translator_core::TranslationServices;
use translator_server::AuditSink;
use translator_server::RequestAuditEvent;
use translator_server::ServerState;
use translator_server::build_router;
use translator_server::serve_listener;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

/// Settings with `en` as default and `en`/`fr` supported.
#[must_use]
pub fn sample_settings() -> I18nSettings {
    I18nSettings {
        default_locale: LocaleCode::new("en"),
        supported_locales: ["en", "fr"].into_iter().map(LocaleCode::new).collect::<BTreeSet<_>>(),
        strict_locales: false,
    }
}

/// Builds server state over a fresh in-memory store.
#[must_use]
pub fn memory_state() -> ServerState {
    let store = SharedTranslationStore::from_store(InMemoryTranslationStore::new());
    ServerState::new(TranslationServices::new(store, sample_settings()))
}

/// Spawns a router for the state and returns its base URL.
pub async fn spawn(state: ServerState) -> String {
    let router = build_router(state).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_listener(router, listener));
    format!("http://{addr}")
}

/// Audit sink capturing events in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    /// Captured events.
    events: Mutex<Vec<RequestAuditEvent>>,
}

impl RecordingAuditSink {
    /// Returns a snapshot of captured events.
    pub fn events(&self) -> Vec<RequestAuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Returns a recording sink plus a trait-object handle to it.
#[must_use]
pub fn recording_sink() -> (Arc<RecordingAuditSink>, Arc<dyn AuditSink>) {
    let sink = Arc::new(RecordingAuditSink::default());
    let handle: Arc<dyn AuditSink> = sink.clone();
    (sink, handle)
}
