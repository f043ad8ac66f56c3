//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and source calls into board level APIs.
//! - Keep CLI and host layers decoupled from storage details.
//! - Provide pure list-view helpers (filter, sort, dashboard metrics).

pub mod board_service;
pub mod query;
pub mod stats;
