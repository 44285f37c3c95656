//! HTTP transport used by [`NetgearClient`](super::NetgearClient).

use std::time::Duration;

use reqwest::Method;
use url::Url;

use crate::error::{CheckError, Result};

/// Every request to the switch is bounded by this timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the session token on authenticated calls
pub const SESSION_HEADER: &str = "session";

/// One request against the switch API
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub session: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            session: None,
            body: None,
        }
    }

    pub fn post(url: Url, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url,
            session: None,
            body: Some(body),
        }
    }

    pub fn with_session(mut self, token: Option<&str>) -> Self {
        self.session = token.map(str::to_string);
        self
    }
}

/// Performs a request and returns the raw response body
pub trait Transport {
    fn execute(&self, request: &ApiRequest) -> Result<String>;
}

/// Blocking reqwest transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("check-netgear/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<String> {
        log::debug!("{} {}", request.method, request.url.path());

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());
        if let Some(token) = &request.session {
            builder = builder.header(SESSION_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::fetch(
                request.url.path(),
                format!("switch returned HTTP {}", status),
            ));
        }

        Ok(response.text()?)
    }
}
