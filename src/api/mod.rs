pub mod models;
pub mod podcast;

pub use models::*;
pub use podcast::*;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { status: u16, url: String },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid episode duration: {0}")]
    InvalidDuration(String),
    #[error("invalid publish date: {0}")]
    InvalidDate(String),
}
