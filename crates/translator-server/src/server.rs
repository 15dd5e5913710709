// crates/translator-server/src/server.rs
// ============================================================================
// Module: Translator Server
// Description: Server assembly from configuration and HTTP serving loop.
// Purpose: Build stores, services, auth, and audit, then serve the router.
// Dependencies: translator-core, translator-config, translator-store-sqlite, axum, tokio
// ============================================================================

//! ## Overview
//! [`TranslatorServer::from_config`] validates configuration, opens the
//! configured store, and assembles a [`ServerState`]. [`build_router`] turns
//! a state into an axum [`Router`] using the state's [`RouteTable`]. The
//! services are synchronous; handlers run them through `block_in_place` on
//! the multi-thread runtime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use translator_config::HEALTH_ROUTE;
use translator_config::ServerConfig;
use translator_config::StoreConfig;
use translator_config::StoreType;
use translator_config::TranslatorConfig;
use translator_core::InMemoryTranslationStore;
use translator_core::SharedTranslationStore;
use translator_core::TranslationServices;
use translator_store_sqlite::SqliteTranslationStore;

use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::auth::AdminAuthz;
use crate::auth::DefaultAdminAuthz;
use crate::handlers;
use crate::routes::RouteTable;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum request body size in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Server State
// ============================================================================

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct ServerState {
    /// Translation services over the configured store.
    pub(crate) services: TranslationServices,
    /// Route paths.
    pub(crate) routes: RouteTable,
    /// Admin authorization policy.
    pub(crate) authz: Arc<dyn AdminAuthz>,
    /// Request audit sink.
    pub(crate) audit: Arc<dyn AuditSink>,
    /// Maximum allowed request body size.
    pub(crate) max_body_bytes: usize,
    /// Whether the public insert route requires admin auth.
    pub(crate) protect_insert: bool,
}

impl ServerState {
    /// Builds state with default routes, local-only auth, and no audit.
    #[must_use]
    pub fn new(services: TranslationServices) -> Self {
        Self {
            services,
            routes: RouteTable::default(),
            authz: Arc::new(DefaultAdminAuthz::from_config(None)),
            audit: Arc::new(NoopAuditSink),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            protect_insert: true,
        }
    }

    /// Replaces the route table.
    #[must_use]
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Replaces the admin authorization policy.
    #[must_use]
    pub fn with_authz(mut self, authz: Arc<dyn AdminAuthz>) -> Self {
        self.authz = authz;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Sets the maximum request body size.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Sets whether the public insert route requires admin auth.
    #[must_use]
    pub const fn with_protect_insert(mut self, protect_insert: bool) -> Self {
        self.protect_insert = protect_insert;
        self
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Builds the axum router for a server state.
///
/// # Errors
///
/// Returns [`ServerError::Config`] when the route table is unusable.
pub fn build_router(state: ServerState) -> Result<Router, ServerError> {
    state.routes.validate()?;
    let routes = state.routes.clone();
    let body_limit = state.max_body_bytes.saturating_add(1);
    let state = Arc::new(state);
    let router = Router::new()
        .route(&routes.get, get(handlers::handle_get))
        .route(&routes.insert, post(handlers::handle_insert))
        .route(&routes.admin_list, get(handlers::handle_admin_list))
        .route(&routes.admin_edit, get(handlers::handle_admin_edit))
        .route(&routes.admin_save, post(handlers::handle_admin_save))
        .route(&routes.admin_remove, post(handlers::handle_admin_remove))
        .route(HEALTH_ROUTE, get(handlers::handle_health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);
    Ok(router)
}

/// Serves a router on an already-bound listener with peer addresses.
///
/// # Errors
///
/// Returns [`ServerError::Transport`] when the server fails.
pub async fn serve_listener(router: Router, listener: TcpListener) -> Result<(), ServerError> {
    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))
}

// ============================================================================
// SECTION: Translator Server
// ============================================================================

/// Translator HTTP server instance.
pub struct TranslatorServer {
    /// Bind address.
    bind: SocketAddr,
    /// Assembled router.
    router: Router,
}

impl TranslatorServer {
    /// Builds a new server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when validation or initialization fails.
    pub fn from_config(mut config: TranslatorConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let bind = config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let store = build_translation_store(&config.store)?;
        let services = TranslationServices::new(store, config.i18n_settings());
        let audit = build_audit_sink(&config.server)?;
        let state = ServerState::new(services)
            .with_routes(RouteTable::from(&config.routes))
            .with_authz(Arc::new(DefaultAdminAuthz::from_config(config.server.auth.as_ref())))
            .with_audit(audit)
            .with_max_body_bytes(config.server.max_body_bytes)
            .with_protect_insert(config.server.protect_insert());
        let router = build_router(state)?;
        Ok(Self {
            bind,
            router,
        })
    }

    /// Returns the configured bind address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind
    }

    /// Binds the configured address and serves requests.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.bind)
            .await
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        tracing::info!(bind = %self.bind, "translator server listening");
        serve_listener(self.router, listener).await
    }

    /// Serves requests on an already-bound listener.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when serving fails.
    pub async fn serve_on(self, listener: TcpListener) -> Result<(), ServerError> {
        serve_listener(self.router, listener).await
    }
}

/// Builds the translation store from configuration.
///
/// # Errors
///
/// Returns [`ServerError`] when the store cannot be opened.
pub fn build_translation_store(config: &StoreConfig) -> Result<SharedTranslationStore, ServerError> {
    let store = match config.store_type {
        StoreType::Memory => SharedTranslationStore::from_store(InMemoryTranslationStore::new()),
        StoreType::Sqlite => {
            let sqlite_config = config
                .sqlite_config()
                .ok_or_else(|| ServerError::Config("sqlite store requires path".to_string()))?;
            let store = SqliteTranslationStore::new(&sqlite_config)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            SharedTranslationStore::from_store(store)
        }
    };
    Ok(store)
}

/// Builds the audit sink from server configuration.
fn build_audit_sink(server: &ServerConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    if !server.audit.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match server.audit.path.as_deref() {
        Some(path) => {
            let sink = FileAuditSink::new(Path::new(path))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Translator server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}
