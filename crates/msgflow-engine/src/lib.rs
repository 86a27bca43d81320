//! msgflow Engine - Orchestration layer
//!
//! Coordinates extraction and persistence (`msgflow-store`) with a diagram
//! [`Target`](msgflow_core::Target) to produce single views and full
//! documentation sites.

pub mod commands;
pub mod readme;
