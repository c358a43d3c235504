// Server module entry point
// Listener construction, signal-driven shutdown, and the accept loop

pub mod listener;
pub mod signal;

pub use listener::bind_listener;
pub use signal::{spawn_signal_listener, Shutdown};

use crate::config::AppState;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept connections until shutdown is requested.
///
/// Each connection is served on its own task. The listener is owned by this
/// function, so the socket is released by scope on every exit path. Accept
/// errors are logged and the loop continues; only shutdown ends it.
pub async fn run(listener: TcpListener, state: Arc<AppState>, shutdown: Shutdown) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.wait() => {
                break;
            }
        }
    }
}

/// Serve a single connection on a spawned task
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, peer_addr, state).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
