//! Permalink generation for data-layer records.
//!
//! A [`PolicyRegistry`](domain::permalink::PolicyRegistry) holds one policy
//! per root record type. [`PermalinkGenerator`](domain::permalink::PermalinkGenerator)
//! scrubs a record's source text, resolves collisions against the store and
//! assigns the result right before the record is written.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
