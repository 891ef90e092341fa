#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No line terminator in the bytes received, so there is no complete request line
    MissingLineTerminator,
    /// The request line is not valid UTF-8
    InvalidEncoding,
    /// The request line has no second token
    MissingPath,
}

/// Extracts the requested path from raw request bytes.
///
/// Only the request line is looked at. The first token (the method) is
/// skipped without validation and the second token is returned verbatim;
/// runs of spaces count as a single separator.
///
/// Empty lines before the request line are skipped, and a line may end in
/// either CR or LF, so `\r\nGET / HTTP/1.1\r\n` and `GET / HTTP/1.1\n`
/// both name `/`.
pub fn parse_request_path(buf: &[u8]) -> Result<&str, ParseError> {
    let start = buf
        .iter()
        .position(|b| !is_line_break(*b))
        .ok_or(ParseError::MissingPath)?;
    let rest = &buf[start..];

    let line_end = find_line_end(rest).ok_or(ParseError::MissingLineTerminator)?;
    let line = std::str::from_utf8(&rest[..line_end]).map_err(|_| ParseError::InvalidEncoding)?;

    let mut parts = line.split(' ').filter(|part| !part.is_empty());
    let _method = parts.next().ok_or(ParseError::MissingPath)?;
    parts.next().ok_or(ParseError::MissingPath)
}

fn is_line_break(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.iter().position(|b| is_line_break(*b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        assert_eq!(parse_request_path(req), Ok("/"));
    }

    #[test]
    fn only_first_line_is_read() {
        let req = b"GET /a.html HTTP/1.1\r\n\xff\xfe garbage";
        assert_eq!(parse_request_path(req), Ok("/a.html"));
    }
}
