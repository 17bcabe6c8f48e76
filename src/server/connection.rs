// Connection handling module
// Serves one accepted TCP connection with hyper's HTTP/1 server

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve a connection in a task on the current `LocalSet`.
///
/// The whole connection, every keep-alive request on it included, is dropped
/// once `performance.connection_timeout` elapses.
pub fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);
        let timeout = Duration::from_secs(state.settings.performance.connection_timeout);

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.settings.performance.keep_alive);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
        );

        match tokio::time::timeout(timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer_addr} closed after reaching its {} second lifetime limit",
                timeout.as_secs()
            )),
        }
    });
}
