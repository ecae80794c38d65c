/// Database configuration and connection management
pub mod database;

/// Seed organization configuration loading from config.toml
pub mod organization;
