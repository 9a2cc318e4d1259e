use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("Listing failed: {0}")]
    ListingFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl NavError {
    pub fn listing_failed(message: impl Into<String>) -> Self {
        Self::ListingFailed(message.into())
    }
}
