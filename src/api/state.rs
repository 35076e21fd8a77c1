//! Application state for the Payslip Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::document::{DocumentSnapshotExporter, TextSnapshotExporter};

/// Shared application state.
///
/// Holds the read-only payslip configuration and the snapshot collaborator.
/// Requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payslip configuration.
    config: Arc<ConfigLoader>,
    /// Renders payslip layouts into documents.
    exporter: Arc<dyn DocumentSnapshotExporter>,
}

impl AppState {
    /// Creates application state that renders snapshots as plain text.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_exporter(config, Arc::new(TextSnapshotExporter))
    }

    /// Creates application state with a specific snapshot exporter.
    pub fn with_exporter(config: ConfigLoader, exporter: Arc<dyn DocumentSnapshotExporter>) -> Self {
        Self {
            config: Arc::new(config),
            exporter,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the snapshot exporter.
    pub fn exporter(&self) -> &dyn DocumentSnapshotExporter {
        self.exporter.as_ref()
    }
}
