pub mod analytics;
pub mod assets;
pub mod errors;
pub mod portfolio;
pub mod seed;

pub use errors::{Error, Result};

pub use analytics::*;
pub use portfolio::*;
