//! HTTP server settings read from the environment.

use crate::errors::{Error, Result};
use std::net::SocketAddr;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Gets the listen address from `BIND_ADDRESS`, defaulting to `127.0.0.1:3000`.
///
/// # Errors
/// Returns [`Error::Config`] when the variable is set but is not a socket address.
pub fn get_bind_address() -> Result<SocketAddr> {
    let raw = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    parse_bind_address(&raw)
}

fn parse_bind_address(raw: &str) -> Result<SocketAddr> {
    raw.trim().parse().map_err(|e| Error::Config {
        message: format!("Invalid BIND_ADDRESS '{raw}': {e}"),
    })
}
