//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Multi-row writes run inside a single SQLite transaction.
//! - Repository APIs report schema-shape problems separately from SQL errors.

pub mod note_repo;
