//! Error types for orghome.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("render failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
