//! Persistence contracts and SQLite implementations.
//!
//! # Responsibility
//! - Expose a flat key-value surface over the board database.
//! - Store the last-known project list under one configured key.
//!
//! # Invariants
//! - Project lists are written whole; there is no partial patch path.
//! - A saved list never contains two projects with the same id.

pub mod kv_store;
pub mod project_store;
