use std::net::SocketAddr;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::error::ServerError;
use crate::http::resolver::{Resolution, Resolver};
use crate::http::response::{send_bad_request, send_not_found, send_ok};
use crate::http::store::FileStore;

/// One accepted socket, used for exactly one request/response exchange.
pub struct Connection<T> {
    stream: T,
    peer: SocketAddr,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Resolving(usize),
    Responding(Resolution),
    Closed,
}

impl<T> Connection<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: T, peer: SocketAddr) -> Self {
        Self {
            stream,
            peer,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the exchange to completion.
    ///
    /// `buffer` is the handler's scratch space; it is cleared and filled
    /// with a single read. The stream is dropped, and so closed, when this
    /// returns, whatever the outcome.
    pub async fn run<S: FileStore>(
        mut self,
        buffer: &mut BytesMut,
        resolver: &Resolver<S>,
    ) -> Result<(), ServerError> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    buffer.clear();
                    let n = self
                        .stream
                        .read_buf(buffer)
                        .await
                        .map_err(ServerError::Receive)?;

                    if n == 0 {
                        tracing::info!("Client {} disconnected before sending a request", self.peer);
                        self.state = ConnectionState::Closed;
                    } else {
                        tracing::debug!("{}", String::from_utf8_lossy(&buffer[..n]));
                        self.state = ConnectionState::Resolving(n);
                    }
                }

                ConnectionState::Resolving(n) => {
                    let resolution = resolver.resolve(&buffer[..n]).await?;
                    self.state = ConnectionState::Responding(resolution);
                }

                ConnectionState::Responding(resolution) => {
                    match resolution {
                        Resolution::Found(resource) => {
                            send_ok(&mut self.stream, &resource).await?;
                            tracing::info!(size = resource.size(), "File sent to {}", self.peer);
                        }
                        Resolution::NotFound => {
                            send_not_found(&mut self.stream).await?;
                            tracing::info!("Not found, answered {} with 404", self.peer);
                        }
                        Resolution::Malformed(e) => {
                            send_bad_request(&mut self.stream).await?;
                            tracing::info!("Malformed request from {}: {:?}", self.peer, e);
                        }
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}
