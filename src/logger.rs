//! Logging utilities.
//!
//! Plain stdout/stderr logging with bracketed tags, plus a Common Log
//! Format access line per request.

use std::net::SocketAddr;

use chrono::Local;
use hyper::Version;

use crate::config::ServerConfig;

pub fn log_server_start(addr: &SocketAddr, config: &ServerConfig) {
    println!("======================================");
    println!("Serving {} at http://{}", config.root_dir.display(), addr);
    if let Some(subsite) = &config.subsite {
        println!("Mounted under subsite prefix: {subsite}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

/// Access line in Common Log Format:
/// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
pub fn log_access(
    remote: &SocketAddr,
    method: &str,
    path: &str,
    version: Version,
    status: u16,
    body_bytes: u64,
) {
    println!(
        "{} - - [{}] \"{} {} {:?}\" {} {}",
        remote.ip(),
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        path,
        version,
        status,
        body_bytes
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_shutdown() {
    println!("\nServer stopped");
}
