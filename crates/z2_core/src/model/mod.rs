//! Domain model for notes and their tags.
//!
//! # Responsibility
//! - Define the data structures shared by repository and service layers.
//!
//! # Invariants
//! - Identifiers are assigned by the store and never reused.
//! - Tag names are the natural key of a tag.

pub mod note;
