//! Core domain types for the organization home page.
//!
//! This crate contains:
//! - Resource identifiers and the shared error type
//! - Organizations, teams, members and viewers
//! - Repository summaries and search options
//! - Sort keys and their search orders
//! - Relationship sets (watch/star) and pagination

pub mod error;
pub mod id;
pub mod membership;
pub mod organization;
pub mod pagination;
pub mod relationship;
pub mod repository;
pub mod sort;

pub use error::{Error, Result};
pub use id::ResourceId;
