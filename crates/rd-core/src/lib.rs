//! # rd-core
//!
//! Core types, workflow rules, and error types for the Readiness delivery workflow.
//!
//! This crate provides the foundational types shared across all Readiness crates:
//! - Entity structs for the delivery hierarchy (projects, sub-projects, tasks,
//!   companies, assignments, per-company schedules, evaluation reports)
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - The typed domain error and its categories
//! - Pure workflow rules: progress aggregation and the report gate
//! - Workflow events emitted to the notification boundary

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod events;
pub mod ids;
pub mod progress;
pub mod responses;
