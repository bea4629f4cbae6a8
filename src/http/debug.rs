//! Debug transport
//!
//! Dumps every outgoing request (`> ` prefix) and incoming response (`< ` prefix)
//! to a diagnostic stream without altering either.

use super::context::CallContext;
use super::transport::Transport;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Request, Response, Version};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Prefix of request dump lines
pub const REQUEST_PREFIX: &str = "> ";

/// Prefix of response dump lines
pub const RESPONSE_PREFIX: &str = "< ";

/// Shared destination for debug dumps
#[derive(Clone)]
pub struct DebugSink {
    writer: Arc<Mutex<dyn Write + Send>>,
}

impl DebugSink {
    /// Write dumps to `writer`
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Write dumps to standard error
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Write `dump` with every line prefixed, followed by a blank line
    pub fn write_dump(&self, dump: &[u8], prefix: &str) {
        let mut output = Vec::with_capacity(dump.len() * 2);
        for line in dump.split_inclusive(|&b| b == b'\n') {
            output.extend_from_slice(prefix.as_bytes());
            output.extend_from_slice(line);
        }
        output.push(b'\n');
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.write_all(&output);
            let _ = writer.flush();
        }
    }
}

impl Default for DebugSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl std::fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugSink").finish_non_exhaustive()
    }
}

/// Transport that logs full requests and responses
pub struct DebugTransport {
    next: Arc<dyn Transport>,
    sink: DebugSink,
}

impl DebugTransport {
    /// Wrap `next`, writing dumps to `sink`
    pub fn new(next: Arc<dyn Transport>, sink: DebugSink) -> Self {
        Self { next, sink }
    }
}

#[async_trait]
impl Transport for DebugTransport {
    async fn round_trip(&self, request: Request, cx: &CallContext) -> Result<Response> {
        let dump = dump_request(&request)?;
        self.sink.write_dump(&dump, REQUEST_PREFIX);
        let response = self.next.round_trip(request, cx).await?;
        let (dump, response) = dump_response(response).await?;
        self.sink.write_dump(&dump, RESPONSE_PREFIX);
        Ok(response)
    }
}

/// Serialize a request in HTTP/1.1 wire form
pub fn dump_request(request: &Request) -> Result<Vec<u8>> {
    let url = request.url();
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    let mut dump = Vec::new();
    let _ = write!(dump, "{} {target} HTTP/1.1\r\n", request.method());
    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => {
                let _ = write!(dump, "Host: {host}:{port}\r\n");
            }
            None => {
                let _ = write!(dump, "Host: {host}\r\n");
            }
        }
    }
    write_headers(&mut dump, request.headers());
    dump.extend_from_slice(b"\r\n");
    if let Some(body) = request.body() {
        let bytes = body.as_bytes().ok_or_else(|| Error::DebugDump {
            what: "request",
            message: "streaming body cannot be dumped".to_string(),
        })?;
        dump.extend_from_slice(bytes);
    }
    Ok(dump)
}

/// Serialize a response and rebuild it with the same status, headers and body
pub async fn dump_response(response: Response) -> Result<(Vec<u8>, Response)> {
    let status = response.status();
    let version = response.version();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(|e| Error::DebugDump {
        what: "response",
        message: e.to_string(),
    })?;

    let mut dump = Vec::new();
    let _ = write!(
        dump,
        "{} {} {}\r\n",
        version_str(version),
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );
    write_headers(&mut dump, &headers);
    dump.extend_from_slice(b"\r\n");
    dump.extend_from_slice(&body);

    let mut rebuilt = http::Response::new(body);
    *rebuilt.status_mut() = status;
    *rebuilt.version_mut() = version;
    *rebuilt.headers_mut() = headers;
    Ok((dump, Response::from(rebuilt)))
}

fn write_headers(dump: &mut Vec<u8>, headers: &reqwest::header::HeaderMap) {
    for (name, value) in headers {
        dump.extend_from_slice(name.as_str().as_bytes());
        dump.extend_from_slice(b": ");
        dump.extend_from_slice(value.as_bytes());
        dump.extend_from_slice(b"\r\n");
    }
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    }
}
