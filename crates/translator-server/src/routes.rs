// crates/translator-server/src/routes.rs
// ============================================================================
// Module: Route Table
// Description: Explicit HTTP path table for the translator surfaces.
// Purpose: Pass route paths into the router builder as a plain value.
// Dependencies: translator-config
// ============================================================================

//! ## Overview
//! [`RouteTable`] names the path of every translator route. It is built from
//! the `[routes]` config section (or [`RouteTable::default`]) and handed to
//! [`crate::build_router`]; there is no process-wide route registry.

use std::collections::BTreeSet;

use serde::Serialize;
use translator_config::HEALTH_ROUTE;
use translator_config::RoutesConfig;

use crate::server::ServerError;

// ============================================================================
// SECTION: Route Kinds
// ============================================================================

/// Translator route identities, used for audit labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Public fetch.
    Get,
    /// Public insert.
    Insert,
    /// Admin listing.
    AdminList,
    /// Admin per-key edit view.
    AdminEdit,
    /// Admin per-key save.
    AdminSave,
    /// Admin removal.
    AdminRemove,
}

impl RouteKind {
    /// Returns a stable label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Insert => "insert",
            Self::AdminList => "admin_list",
            Self::AdminEdit => "admin_edit",
            Self::AdminSave => "admin_save",
            Self::AdminRemove => "admin_remove",
        }
    }
}

// ============================================================================
// SECTION: Route Table
// ============================================================================

/// HTTP paths for each translator route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    /// Public fetch path.
    pub get: String,
    /// Public insert path.
    pub insert: String,
    /// Admin listing path.
    pub admin_list: String,
    /// Admin edit path.
    pub admin_edit: String,
    /// Admin save path.
    pub admin_save: String,
    /// Admin remove path.
    pub admin_remove: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::from(&RoutesConfig::default())
    }
}

impl From<&RoutesConfig> for RouteTable {
    fn from(config: &RoutesConfig) -> Self {
        Self {
            get: config.get.clone(),
            insert: config.insert.clone(),
            admin_list: config.admin_list.clone(),
            admin_edit: config.admin_edit.clone(),
            admin_save: config.admin_save.clone(),
            admin_remove: config.admin_remove.clone(),
        }
    }
}

impl RouteTable {
    /// Returns the path for a route kind.
    #[must_use]
    pub fn path(&self, kind: RouteKind) -> &str {
        match kind {
            RouteKind::Get => &self.get,
            RouteKind::Insert => &self.insert,
            RouteKind::AdminList => &self.admin_list,
            RouteKind::AdminEdit => &self.admin_edit,
            RouteKind::AdminSave => &self.admin_save,
            RouteKind::AdminRemove => &self.admin_remove,
        }
    }

    /// Checks that paths are absolute, distinct, and free of capture syntax.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] for an unusable table.
    pub fn validate(&self) -> Result<(), ServerError> {
        let kinds = [
            RouteKind::Get,
            RouteKind::Insert,
            RouteKind::AdminList,
            RouteKind::AdminEdit,
            RouteKind::AdminSave,
            RouteKind::AdminRemove,
        ];
        let mut seen = BTreeSet::new();
        seen.insert(HEALTH_ROUTE);
        for kind in kinds {
            let path = self.path(kind);
            if !path.starts_with('/') || path.contains(['{', '}', '*', ':', '?', '#']) {
                return Err(ServerError::Config(format!("invalid {} route: {path}", kind.label())));
            }
            if !seen.insert(path) {
                return Err(ServerError::Config(format!(
                    "duplicate {} route: {path}",
                    kind.label()
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::RouteKind;
    use super::RouteTable;

    #[test]
    fn default_table_is_valid() {
        let table = RouteTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.path(RouteKind::Get), "/api/translator/get");
        assert_eq!(table.path(RouteKind::AdminList), "/translator");
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let table = RouteTable {
            admin_save: "/translator".to_string(),
            ..RouteTable::default()
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn capture_syntax_is_rejected() {
        let table = RouteTable {
            get: "/api/{key}".to_string(),
            ..RouteTable::default()
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn health_path_is_reserved() {
        let table = RouteTable {
            get: "/health".to_string(),
            ..RouteTable::default()
        };
        assert!(table.validate().is_err());
    }
}
