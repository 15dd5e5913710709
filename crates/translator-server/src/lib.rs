// crates/translator-server/src/lib.rs
// ============================================================================
// Module: Translator Server Library
// Description: HTTP surfaces for translation fetch, insert, and admin.
// Purpose: Expose translator services over axum with auth and audit.
// Dependencies: translator-core, translator-config, axum, tokio
// ============================================================================

//! ## Overview
//! The server maps an explicit [`RouteTable`] onto the public fetch/insert
//! API and the administrative list/edit/save/remove API. Admin requests go
//! through [`AdminAuthz`]; every handled request is recorded through an
//! [`AuditSink`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
mod handlers;
pub mod routes;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::StderrAuditSink;
pub use auth::AdminAction;
pub use auth::AdminAuthz;
pub use auth::AuthContext;
pub use auth::AuthError;
pub use auth::DefaultAdminAuthz;
pub use auth::RequestContext;
pub use routes::RouteKind;
pub use routes::RouteTable;
pub use server::ServerError;
pub use server::ServerState;
pub use server::TranslatorServer;
pub use server::build_router;
pub use server::build_translation_store;
pub use server::serve_listener;
