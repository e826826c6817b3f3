/// Database configuration and connection management
pub mod database;

/// HTTP listen address from environment variables
pub mod server;

/// User and session token configuration from config.toml
pub mod users;
