//! HTTP server for organization home pages.
//!
//! Serves `GET /{org}/`: the organization's repositories, member roster and
//! the viewer's watch/star marks.

pub mod auth;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use state::AppState;
