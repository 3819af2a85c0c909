// Connection handling module
// Serves a single accepted TCP connection

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::handler;
use crate::logger;

/// Serve one accepted connection in a spawned task.
///
/// Connection failures (client disconnects, malformed requests) are logged
/// and confined to the task; the accept loop never sees them. The counter
/// tracks in-flight connections for the graceful drain at shutdown.
pub fn spawn_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    config: Arc<ServerConfig>,
    conn_counter: Arc<AtomicUsize>,
) {
    conn_counter.fetch_add(1, Ordering::SeqCst);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let config = Arc::clone(&config);
            async move { handler::handle_request(req, peer_addr, config).await }
        });

        if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
            logger::log_connection_error(&err);
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
