//! Text codecs for moving project lists across file boundaries.
//!
//! # Responsibility
//! - Encode/decode project lists to and from CSV import/export files.
//!
//! # Invariants
//! - Codecs are pure: no I/O, no clock reads except id generation for rows
//!   that arrive without one.

pub mod csv;
