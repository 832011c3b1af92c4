//! Error types
//!
//! The schema builders never fail; only profile loading and script embedding
//! can return an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid base URL '{input}': {source}")]
    InvalidBaseUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to parse business profile: {0}")]
    Config(#[source] serde_json::Error),

    #[error("failed to serialize JSON-LD document: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
