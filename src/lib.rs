//! Personnel Reconciliation Engine
//!
//! This crate provides the business core of a personnel-management backend:
//! keeping attendance and leave records mutually exclusive per employee-day,
//! enforcing the monthly submission deadline window, deriving payroll records
//! from recorded attendance and a progressive tax schedule, and applying
//! role-scoped partial updates to performance evaluations.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
