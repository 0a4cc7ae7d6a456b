pub(crate) mod seed_model;
pub(crate) mod seed_service;

// Re-export the public interface
pub use seed_model::{SeedData, SeedPortfolio, SeedSummary};
pub use seed_service::SeedService;
