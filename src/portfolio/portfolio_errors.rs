use thiserror::Error;

/// Custom error type for portfolio-related operations
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Position not found: {0}")]
    PositionNotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for portfolio operations
pub type Result<T> = std::result::Result<T, PortfolioError>;
