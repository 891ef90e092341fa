use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::resolver::Resource;
use crate::http::writer::{write_all_to, write_str_to, WriteError};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Content type sent with every 200 response; no sniffing is done.
pub const CONTENT_TYPE: &str = "text/html";

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): file found and sent
/// - `BadRequest` (400): request line could not be parsed
/// - `NotFound` (404): no such file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use plinth::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }

    /// Full status line including the trailing CRLF.
    ///
    /// ```
    /// # use plinth::http::response::StatusCode;
    /// assert_eq!(StatusCode::NotFound.status_line(), "HTTP/1.1 404 Not Found\r\n");
    /// ```
    pub fn status_line(&self) -> String {
        format!("{} {} {}\r\n", HTTP_VERSION, self.as_u16(), self.reason_phrase())
    }
}

/// Sends one header line (terminator included).
///
/// Every header is a fail-fast checkpoint: if the write fails the write
/// half of the stream is shut down before the error is returned.
pub async fn send_header<W>(stream: &mut W, line: &str) -> Result<(), WriteError>
where
    W: AsyncWrite + Unpin,
{
    if let Err(e) = write_str_to(stream, line).await {
        let _ = stream.shutdown().await;
        return Err(e);
    }
    Ok(())
}

/// Sends a 200 response: status line, headers, blank line, then the file bytes.
pub async fn send_ok<W>(stream: &mut W, resource: &Resource) -> Result<(), WriteError>
where
    W: AsyncWrite + Unpin,
{
    send_header(stream, &StatusCode::Ok.status_line()).await?;
    send_header(stream, &format!("Content-length: {}\r\n", resource.size())).await?;
    send_header(stream, &format!("Content-Type: {}\r\n", CONTENT_TYPE)).await?;
    send_header(stream, "Connection: close\r\n\r\n").await?;

    write_all_to(stream, resource.content()).await
}

/// Sends the bare 404 status line. No headers, no body, no blank line.
pub async fn send_not_found<W>(stream: &mut W) -> Result<(), WriteError>
where
    W: AsyncWrite + Unpin,
{
    send_header(stream, &StatusCode::NotFound.status_line()).await
}

/// Sends the bare 400 status line, shaped like the 404 one.
pub async fn send_bad_request<W>(stream: &mut W) -> Result<(), WriteError>
where
    W: AsyncWrite + Unpin,
{
    send_header(stream, &StatusCode::BadRequest.status_line()).await
}
