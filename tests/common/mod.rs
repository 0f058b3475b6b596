//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};

/// Bind a listener on an ephemeral port and keep it alive, returning it with
/// its address. Used to occupy a port or to stand in for a live peer.
pub async fn occupy_port() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Grab an ephemeral port that is free right now.
pub async fn free_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// True if a TCP connection to `addr` can be established.
pub async fn can_connect(addr: SocketAddr) -> bool {
    TcpStream::connect(addr).await.is_ok()
}
