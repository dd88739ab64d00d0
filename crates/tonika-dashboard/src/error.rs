//! Dashboard error types.
//!
//! Every variant is shown to the user as an inline warning; none of them
//! ends the session.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Could not reach the API: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status})! Try again later.")]
    Api { status: u16 },

    #[error("Failed to process the API response: {0}")]
    Parse(String),

    /// The API answered with an `{"error": ...}` payload.
    #[error("{0}")]
    Rejected(String),

    #[error("Enter some text to analyze")]
    EmptyInput,
}

pub type DashboardResult<T> = Result<T, DashboardError>;
