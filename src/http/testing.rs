//! In-memory transports for unit tests

use super::context::CallContext;
use super::transport::Transport;
use crate::error::{Error, Result, TransportErrorKind};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, Request, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use url::Url;

/// A request as observed by the scripted transport
#[derive(Debug, Clone)]
pub(crate) struct Seen {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Seen {
    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// One scripted outcome
#[derive(Debug, Clone)]
pub(crate) enum Step {
    Respond {
        status: u16,
        headers: Vec<(&'static str, String)>,
        body: String,
    },
    Fail(TransportErrorKind),
}

impl Step {
    pub fn status(status: u16) -> Self {
        Self::Respond {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn body(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::body(200, value.to_string())
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Self::Respond { headers, .. } = &mut self {
            headers.push((name, value.into()));
        }
        self
    }
}

/// Replays a fixed list of outcomes; the last one repeats forever
pub(crate) struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    seen: Mutex<Vec<Seen>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    fn next_step(&self) -> Step {
        let mut steps = self.steps.lock().unwrap();
        if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps.front().cloned().unwrap_or_else(|| Step::status(200))
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn round_trip(&self, request: Request, _cx: &CallContext) -> Result<Response> {
        self.seen.lock().unwrap().push(Seen {
            method: request.method().clone(),
            url: request.url().clone(),
            headers: request.headers().clone(),
            body: request
                .body()
                .and_then(|b| b.as_bytes())
                .map(<[u8]>::to_vec),
        });
        match self.next_step() {
            Step::Respond {
                status,
                headers,
                body,
            } => {
                let mut builder = http::Response::builder().status(status);
                for (name, value) in headers {
                    builder = builder.header(name, value);
                }
                Ok(builder.body(body).unwrap().into())
            }
            Step::Fail(kind) => Err(Error::transport(kind, format!("scripted {kind} failure"))),
        }
    }
}

/// Build a request for `method` and `url`
pub(crate) fn request(method: Method, url: &str) -> Request {
    Request::new(method, Url::parse(url).unwrap())
}
