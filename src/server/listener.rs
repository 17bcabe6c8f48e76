// Listener module
// Creates the TCP listener the mock server accepts on

use crate::error::ListenError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Create a `TcpListener` bound to `addr`.
///
/// `SO_REUSEADDR` lets the port be reused while old sockets sit in `TIME_WAIT`.
/// `SO_REUSEPORT` is left off so a port held by another process is an error.
/// Must be called from inside a Tokio runtime.
pub fn bind(addr: SocketAddr) -> Result<TcpListener, ListenError> {
    create_listener(addr).map_err(|source| ListenError { addr, source })
}

fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // Windows lets SO_REUSEADDR steal a bound port, so only set it elsewhere
    #[cfg(not(windows))]
    socket.set_reuse_address(true)?;

    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    // socket2::Socket -> std::net::TcpListener -> tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
