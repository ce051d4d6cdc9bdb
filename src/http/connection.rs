use std::time::Duration;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, timeout_at};

use crate::config::Config;
use crate::http::parser::{ParseError, declared_content_length, find_head_end, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::{Framing, ResponseWriter};
use crate::routing::Router;

const READ_CHUNK: usize = 1024;

/// Per-connection limits and framing, taken from [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub max_request_bytes: usize,
    pub framing: Framing,
}

impl From<&Config> for ConnectionOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            read_timeout: cfg.read_timeout(),
            write_timeout: cfg.write_timeout(),
            max_request_bytes: cfg.max_request_bytes,
            framing: if cfg.legacy_framing {
                Framing::Legacy
            } else {
                Framing::Standard
            },
        }
    }
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Router,
    options: ConnectionOptions,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Router, options: ConnectionOptions) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            router,
            options,
        }
    }

    /// Serves exactly one request, then closes.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(Ok(req)) => ConnectionState::Processing(req),
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Rejecting unparseable request");
                        let writer = ResponseWriter::new(&Response::bad_request(), self.options.framing);
                        ConnectionState::Writing(writer)
                    }
                    None => ConnectionState::Closed,
                },

                ConnectionState::Processing(req) => {
                    let response = self.router.route(&req).await;
                    tracing::info!(
                        method = req.method.as_str(),
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request handled"
                    );
                    ConnectionState::Writing(ResponseWriter::new(&response, self.options.framing))
                }

                ConnectionState::Writing(mut writer) => {
                    writer
                        .write_with_deadline(&mut self.stream, self.options.write_timeout)
                        .await?;
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Reads until a whole request is buffered or the peer stops sending.
    ///
    /// The read timeout bounds the whole request, not each read. `Ok(None)`
    /// means the peer closed without sending anything. An inner `Err` is a
    /// request that arrived but cannot be served.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Result<Request, ParseError>>> {
        let deadline = Instant::now() + self.options.read_timeout;
        let mut scanned: usize = 0;
        // Head plus declared body, once the head is known
        let mut expected_len = None;

        loop {
            if expected_len.is_none() {
                if let Some(end) = find_head_end(&self.buffer, scanned.saturating_sub(3)) {
                    let body_len = match declared_content_length(&self.buffer[..end]) {
                        Ok(len) => len.unwrap_or(0),
                        Err(e) => return Ok(Some(Err(e))),
                    };
                    expected_len = Some(end + 4 + body_len);
                }
                scanned = self.buffer.len();
            }

            if let Some(len) = expected_len {
                if self.buffer.len() >= len {
                    return Ok(Some(parse_http_request(&self.buffer)));
                }
                if len > self.options.max_request_bytes {
                    return Ok(Some(Err(ParseError::TooLarge(self.options.max_request_bytes))));
                }
            }

            if self.buffer.len() > self.options.max_request_bytes {
                return Ok(Some(Err(ParseError::TooLarge(self.options.max_request_bytes))));
            }

            self.buffer.reserve(READ_CHUNK);
            let n = timeout_at(deadline, self.stream.read_buf(&mut self.buffer))
                .await
                .context("read timeout")??;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                // Peer half-closed; serve what arrived
                return Ok(Some(parse_http_request(&self.buffer)));
            }
        }
    }
}
