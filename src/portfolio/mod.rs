pub(crate) mod portfolio_errors;
pub(crate) mod portfolio_model;
pub(crate) mod portfolio_repository;
pub(crate) mod portfolio_service;
pub(crate) mod portfolio_traits;

// Re-export the public interface
pub use portfolio_model::{
    NewPortfolio, NewPosition, Portfolio, PortfolioUpdate, Position,
};
pub use portfolio_repository::InMemoryPortfolioRepository;
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};

// Re-export error types for convenience
pub use portfolio_errors::PortfolioError;
