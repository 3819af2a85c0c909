// Server module entry
// Listener setup, accept loop, and graceful shutdown

pub mod conn;
pub mod listener;
pub mod signal;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use crate::config::ServerConfig;
use crate::logger;

/// How long shutdown waits for in-flight responses to complete.
const DRAIN_DEADLINE: Duration = Duration::from_secs(5);

/// Bind the listener and run the accept loop until an interrupt arrives.
///
/// Each accepted connection is served in its own task; nothing in the loop
/// blocks acceptance. On shutdown the loop stops accepting, lets in-flight
/// responses finish (bounded by `DRAIN_DEADLINE`), and returns.
pub async fn run(config: Arc<ServerConfig>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr();
    let tcp_listener = listener::create_listener(addr)?;

    let shutdown = Arc::new(Notify::new());
    signal::spawn_shutdown_listener(Arc::clone(&shutdown));

    let conn_counter = Arc::new(AtomicUsize::new(0));

    logger::log_server_start(&addr, &config);

    loop {
        tokio::select! {
            accept_result = tcp_listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        conn::spawn_connection(
                            stream,
                            peer_addr,
                            Arc::clone(&config),
                            Arc::clone(&conn_counter),
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }

    drop(tcp_listener);
    drain_connections(&conn_counter).await;
    logger::log_shutdown();

    Ok(())
}

/// Wait for in-flight connections to finish, up to the drain deadline.
async fn drain_connections(conn_counter: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + DRAIN_DEADLINE;

    while conn_counter.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning("Drain deadline reached, closing with connections in flight");
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
