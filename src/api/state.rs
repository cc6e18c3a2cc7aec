//! Application state for the personnel engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{EngineConfig, PayrollConfig};
use crate::engine::CalendarPolicy;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains the store handle and loaded configuration shared across all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<MemoryStore>,
    config: Arc<EngineConfig>,
}

impl AppState {
    /// Creates a new application state over a store and configuration.
    pub fn new(store: MemoryStore, config: EngineConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Returns the store handle.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns the payroll configuration.
    pub fn payroll_config(&self) -> &PayrollConfig {
        &self.config.payroll
    }

    /// Builds the calendar policy from the loaded configuration.
    pub fn calendar_policy(&self) -> CalendarPolicy {
        CalendarPolicy::new(self.config.calendar.edit_buffer_days)
    }
}
