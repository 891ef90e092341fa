//! Shared test fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use plinth::error::ServerError;
use plinth::http::resolver::Resolver;
use plinth::http::store::FileStore;
use plinth::server::Server;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// In-memory file store keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<String, Vec<u8>>,
    broken: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.to_string(), content.into());
        self
    }

    /// A path that opens but fails to read.
    pub fn with_broken_file(mut self, path: &str) -> Self {
        self.broken = Some(path.to_string());
        self
    }
}

impl FileStore for MemoryStore {
    fn load(&self, relative: &str) -> impl Future<Output = io::Result<Option<Vec<u8>>>> + Send {
        let result = if self.broken.as_deref() == Some(relative) {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "short read"))
        } else {
            Ok(self.files.get(relative).cloned())
        };
        async move { result }
    }
}

/// Transport that accepts at most one byte per write call.
#[derive(Debug, Default)]
pub struct TrickleWriter {
    pub written: Vec<u8>,
    pub calls: usize,
}

impl AsyncWrite for TrickleWriter {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.calls += 1;
        match buf.first() {
            Some(byte) => {
                self.written.push(*byte);
                Poll::Ready(Ok(1))
            }
            None => Poll::Ready(Ok(0)),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Transport that accepts `budget` bytes, then reports the peer as gone
/// (`Ok(0)`), or fails with `ConnectionReset` when `reset` is set.
#[derive(Debug, Default)]
pub struct ClosingWriter {
    pub written: Vec<u8>,
    pub budget: usize,
    pub reset: bool,
    pub calls: usize,
    pub shut_down: bool,
}

impl ClosingWriter {
    pub fn after(budget: usize) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    pub fn resetting_after(budget: usize) -> Self {
        Self {
            budget,
            reset: true,
            ..Self::default()
        }
    }
}

impl AsyncWrite for ClosingWriter {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.calls += 1;
        if self.budget == 0 {
            if self.reset {
                return Poll::Ready(Err(io::Error::from(io::ErrorKind::ConnectionReset)));
            }
            return Poll::Ready(Ok(0));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        self.written.extend_from_slice(&buf[..n]);
        Poll::Ready(Ok(n))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.shut_down = true;
        Poll::Ready(Ok(()))
    }
}

/// Starts a server over `store` on an ephemeral port.
pub async fn spawn_server(store: MemoryStore) -> SocketAddr {
    spawn_server_with_handle(store).await.0
}

/// Like [`spawn_server`], also returning the task so the result of `serve`
/// can be inspected.
pub async fn spawn_server_with_handle(
    store: MemoryStore,
) -> (SocketAddr, JoinHandle<Result<(), ServerError>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut server = Server::new(Resolver::new(store, "/index.html"), 1024);
        server.serve(listener).await
    });

    (addr, handle)
}

/// Sends `request` on a fresh connection and reads until the server closes it.
pub async fn roundtrip(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}
