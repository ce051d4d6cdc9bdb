use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Request line missing or with fewer than two fields
    #[error("malformed request line")]
    MalformedRequest,
    #[error("request head is not valid UTF-8")]
    InvalidEncoding,
    #[error("invalid Content-Length header")]
    InvalidContentLength,
    /// Fewer body bytes than `Content-Length` announces
    #[error("request body incomplete")]
    Incomplete,
    #[error("request exceeds {0} bytes")]
    TooLarge(usize),
}

/// Parses a raw request buffer.
///
/// Lines after the request line with exactly one `": "` separator are
/// headers. With `Content-Length` present the body is exactly that many bytes
/// after the blank line. Without it, the last non-empty line that is not a
/// header is taken as the body.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let (head_bytes, tail) = match find_head_end(buf, 0) {
        Some(end) => (&buf[..end], Some(&buf[end + 4..])),
        None => (buf, None),
    };

    let head = std::str::from_utf8(head_bytes).map_err(|_| ParseError::InvalidEncoding)?;
    let mut lines = head.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::MalformedRequest)?;
    let mut parts = request_line.split_whitespace();

    let method = parts.next().ok_or(ParseError::MalformedRequest)?;
    let path = parts.next().ok_or(ParseError::MalformedRequest)?;
    let version = parts.next().unwrap_or("HTTP/1.1");

    // Headers
    let mut headers = HashMap::new();
    let mut body_line = None;

    for line in lines {
        scan_line(line, &mut headers, &mut body_line);
    }

    // Body
    let content_length = content_length_of(&headers)?;

    let body = match (content_length, tail) {
        (Some(len), Some(tail)) => {
            if tail.len() < len {
                return Err(ParseError::Incomplete);
            }
            tail[..len].to_vec()
        }
        (Some(0), None) => Vec::new(),
        (Some(_), None) => return Err(ParseError::Incomplete),
        (None, tail) => {
            if let Some(tail) = tail {
                let tail = String::from_utf8_lossy(tail);
                for line in tail.split("\r\n") {
                    scan_line(line, &mut headers, &mut body_line);
                }
            }
            body_line.map(|line| line.into_bytes()).unwrap_or_default()
        }
    };

    Ok(Request {
        method: Method::parse(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    })
}

/// Offset of the blank line ending the header block, searching from `from`.
///
/// Callers feeding a growing buffer can pass the previous length minus 3 so
/// already scanned bytes are not searched again.
pub fn find_head_end(buf: &[u8], from: usize) -> Option<usize> {
    let from = from.min(buf.len());
    buf[from..]
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| from + pos)
}

/// `Content-Length` declared by a header block (everything before the blank line).
pub fn declared_content_length(head: &[u8]) -> Result<Option<usize>, ParseError> {
    let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidEncoding)?;
    let mut headers = HashMap::new();
    let mut body_line = None;

    for line in head.split("\r\n").skip(1) {
        scan_line(line, &mut headers, &mut body_line);
    }
    content_length_of(&headers)
}

fn content_length_of(headers: &HashMap<String, String>) -> Result<Option<usize>, ParseError> {
    headers
        .get("Content-Length")
        .map(|v| {
            v.trim()
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidContentLength)
        })
        .transpose()
}

fn scan_line(line: &str, headers: &mut HashMap<String, String>, body_line: &mut Option<String>) {
    match line.split_once(": ") {
        Some((key, value)) if !value.contains(": ") => {
            headers.insert(key.to_string(), value.to_string());
        }
        _ if !line.is_empty() => {
            *body_line = Some(line.to_string());
        }
        _ => {}
    }
}
