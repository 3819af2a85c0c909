use std::process;
use std::sync::Arc;

use clap::Parser;

mod cli;
mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() {
    let args = cli::Cli::parse();

    // Validated before any listener binds; a bad directory exits nonzero
    // without a backtrace.
    let config = match config::ServerConfig::from_cli(args) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            logger::log_error(&e);
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            logger::log_error(&format!("Failed to build runtime: {e}"));
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(server::run(config)) {
        logger::log_error(&format!("Server error: {e}"));
        process::exit(1);
    }
}
