//! Server configuration.
//!
//! Built once from the CLI at startup and shared read-only across
//! connections for the lifetime of the process.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cli::Cli;

/// Immutable server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory tree exposed by the server.
    pub root_dir: PathBuf,
    /// Optional URL prefix the tree is mounted under.
    pub subsite: Option<String>,
    /// Listen port.
    pub port: u16,
}

impl ServerConfig {
    /// Build a validated configuration from parsed CLI arguments.
    ///
    /// Fails when the root directory does not exist. This runs before any
    /// listener is bound so a bad directory never leaves a socket behind.
    pub fn from_cli(cli: Cli) -> Result<Self, String> {
        if !cli.directory.exists() {
            return Err(format!(
                "directory '{}' does not exist",
                cli.directory.display()
            ));
        }

        Ok(Self {
            root_dir: cli.directory,
            subsite: normalize_subsite(cli.subsite),
            port: cli.port,
        })
    }

    /// Listen address: all interfaces on the configured port.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// A subsite of exactly `/` means "no subsite".
fn normalize_subsite(subsite: Option<String>) -> Option<String> {
    match subsite {
        Some(s) if s == "/" => None,
        other => other,
    }
}
