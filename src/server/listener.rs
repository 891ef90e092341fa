use std::net::SocketAddr;

use bytes::BytesMut;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, warn};

use crate::config::{Config, ServerConfig};
use crate::error::ServerError;
use crate::http::connection::Connection;
use crate::http::resolver::Resolver;
use crate::http::store::{DiskStore, FileStore};

/// Binds and listens on `cfg.listen_addr` with `cfg.backlog`.
pub fn bind(cfg: &ServerConfig) -> Result<TcpListener, ServerError> {
    let bind_err = |source| ServerError::Bind {
        addr: cfg.listen_addr.clone(),
        source,
    };

    let addr: SocketAddr = cfg.listen_addr.parse().map_err(|_| ServerError::Config {
        reason: format!("invalid listen address {}", cfg.listen_addr),
    })?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(bind_err)?;

    socket.set_reuseaddr(true).map_err(bind_err)?;
    socket.bind(addr).map_err(bind_err)?;
    socket.listen(cfg.backlog).map_err(bind_err)
}

/// Sequential accept loop. One connection is handled to completion before
/// the next is accepted.
pub struct Server<S> {
    resolver: Resolver<S>,
    buffer: BytesMut,
}

impl<S: FileStore> Server<S> {
    pub fn new(resolver: Resolver<S>, buffer_capacity: usize) -> Self {
        Self {
            resolver,
            buffer: BytesMut::with_capacity(buffer_capacity),
        }
    }

    /// Serves connections until a fatal error occurs.
    pub async fn serve(&mut self, listener: TcpListener) -> Result<(), ServerError> {
        loop {
            let (socket, peer) = listener.accept().await.map_err(ServerError::Accept)?;
            info!("Client connected from {}", peer);

            let conn = Connection::new(socket, peer);
            match conn.run(&mut self.buffer, &self.resolver).await {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => warn!("Connection error from {}: {}", peer, e),
            }
        }
    }
}

pub async fn run(cfg: &Config) -> Result<(), ServerError> {
    let listener = bind(&cfg.server)?;
    info!("Listening on {}", cfg.server.listen_addr);

    let store = DiskStore::new(&cfg.static_files.root);
    let resolver = Resolver::new(store, cfg.static_files.index.clone());

    Server::new(resolver, cfg.server.buffer_capacity)
        .serve(listener)
        .await
}
