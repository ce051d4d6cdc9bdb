use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// How the end of a response is framed on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// One blank line after the headers, then the body.
    #[default]
    Standard,
    /// Blank line only when headers are present, and `\r\n\r\n` after the body.
    Legacy,
}

pub fn serialize_response(resp: &Response, framing: Framing) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in resp.headers.iter() {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    match framing {
        Framing::Standard => {
            buf.extend_from_slice(b"\r\n");
            buf.extend_from_slice(&resp.body);
        }
        Framing::Legacy => {
            if !resp.headers.is_empty() {
                buf.extend_from_slice(b"\r\n");
            }
            buf.extend_from_slice(&resp.body);
            buf.extend_from_slice(b"\r\n\r\n");
        }
    }

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response, framing: Framing) -> Self {
        Self {
            buffer: serialize_response(response, framing),
            written: 0,
        }
    }

    pub fn remaining(&self) -> &[u8] {
        &self.buffer[self.written..]
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }

    /// [`ResponseWriter::write_to_stream`] bounded by `deadline`.
    pub async fn write_with_deadline<S>(
        &mut self,
        stream: &mut S,
        deadline: Duration,
    ) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        timeout(deadline, self.write_to_stream(stream))
            .await
            .context("write timeout")?
    }
}
