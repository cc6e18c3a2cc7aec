//! Configuration loading and management for the reconciliation engine.
//!
//! This module provides the typed configuration structures and the YAML
//! loader that fills them.
//!
//! # Example
//!
//! ```no_run
//! use personnel_engine::config::EngineConfig;
//!
//! let config = EngineConfig::load("./config/engine.yaml").unwrap();
//! println!("Overtime rate: {} yen/hour", config.payroll.overtime_hourly_rate);
//! ```

mod loader;
mod types;

pub use types::{BasicSalarySource, CalendarConfig, EngineConfig, PayrollConfig};
