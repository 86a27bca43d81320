//! Core types shared across msgflow facilities
//!
//! Holds the canonical field keys and event names used by the logging
//! macros, so every crate emits the same structured shape.

pub mod schema;
