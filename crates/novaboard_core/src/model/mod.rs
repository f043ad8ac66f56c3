//! Domain model for board projects.
//!
//! # Responsibility
//! - Define the canonical project record shared by list, board and timeline
//!   projections.
//! - Keep enumeration coercion rules next to the types they protect.
//!
//! # Invariants
//! - Every project is identified by an opaque, collection-unique `id`.
//! - Deletion is a hard removal; there is no tombstone state.

pub mod project;
