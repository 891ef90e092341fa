use std::io;

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("peer closed the connection after {written} of {total} bytes")]
    PeerClosed { written: usize, total: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Writes every byte of `buf`, looping over partial writes.
///
/// A write that accepts zero bytes means the peer went away; it is reported
/// as [`WriteError::PeerClosed`] and not retried. Transport errors are
/// returned as-is. The stream is never closed here.
pub async fn write_all_to<W>(stream: &mut W, buf: &[u8]) -> Result<(), WriteError>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;

    while written < buf.len() {
        let n = stream.write(&buf[written..]).await?;

        if n == 0 {
            tracing::debug!(written, total = buf.len(), "Client disconnected while writing");
            return Err(WriteError::PeerClosed {
                written,
                total: buf.len(),
            });
        }

        written += n;
    }

    stream.flush().await?;
    Ok(())
}

pub async fn write_str_to<W>(stream: &mut W, s: &str) -> Result<(), WriteError>
where
    W: AsyncWrite + Unpin,
{
    write_all_to(stream, s.as_bytes()).await
}
