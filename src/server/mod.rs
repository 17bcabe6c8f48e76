// Server module entry point
// Listener creation, accept loop and per-connection serving

pub mod connection;
pub mod listener;
pub mod signal;

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

pub use listener::bind;
pub use signal::shutdown_signal;

/// Accept connections until `shutdown` resolves.
///
/// Connections are served with `spawn_local`, so this must run inside a
/// `tokio::task::LocalSet`. Accept errors are logged and the loop keeps going;
/// one failed request never stops the server.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => {
                logger::log_shutdown();
                break;
            }
        }
    }
}
