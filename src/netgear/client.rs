use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use super::transport::{ApiRequest, HttpTransport, Transport};
use super::types::{DeviceInfo, DeviceInfoResponse, PoeStatus, PortStatistics, PortStatisticsResponse};
use crate::error::{CheckError, Result};

/// The API ignores these and always answers with the first page, so
/// switches with 25 or more ports per direction may be undercounted.
const PAGE_INDEX: &str = "1";
const PAGE_SIZE: &str = "25";

/// Traffic direction of the `port_statistics` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

/// Authenticated session against one switch
pub struct NetgearClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: Url,
    session: Option<String>,
}

impl NetgearClient<HttpTransport> {
    /// Client using the blocking HTTP transport with the default timeout
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::with_transport(base_url, HttpTransport::new()?)
    }
}

impl<T: Transport> NetgearClient<T> {
    /// `base_url` is the switch address; `/api/v1` is appended to its path
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self> {
        Ok(Self {
            transport,
            base_url: api_base(base_url)?,
            session: None,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let payload = json!({
            "user": {
                "name": username,
                "password": password,
            }
        });
        let request = ApiRequest::post(self.endpoint("login"), payload);

        let body = self
            .transport
            .execute(&request)
            .map_err(|e| CheckError::auth(e.to_string()))?;
        let token = session_token(&body)?;

        log::debug!("Logged in to {}", self.base_url);
        self.session = Some(token);
        Ok(())
    }

    /// Best-effort: failures are logged and otherwise ignored
    pub fn logout(&mut self) {
        let Some(token) = self.session.take() else {
            return;
        };

        let request = ApiRequest::get(self.endpoint("logout")).with_session(Some(&token));
        if let Err(e) = self.transport.execute(&request) {
            log::debug!("Logout failed: {}", e);
        }
    }

    pub fn device_info(&self) -> Result<DeviceInfo> {
        let response: DeviceInfoResponse = self.get("device_info", self.endpoint("device_info"))?;
        Ok(response.device_info)
    }

    pub fn port_statistics(&self, direction: Direction) -> Result<PortStatistics> {
        let mut url = self.endpoint("port_statistics");
        url.query_pairs_mut()
            .append_pair("type", direction.as_str())
            .append_pair("indexPage", PAGE_INDEX)
            .append_pair("pageSize", PAGE_SIZE);

        let response: PortStatisticsResponse = self.get("port_statistics", url)?;
        Ok(response.port_statistics)
    }

    pub fn poe_status(&self) -> Result<PoeStatus> {
        self.get("swcfg_poe", self.endpoint("swcfg_poe"))
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(path);
        }
        url
    }

    /// Authenticated GET decoding the JSON body into `R`
    fn get<R: DeserializeOwned>(&self, name: &str, url: Url) -> Result<R> {
        let token = self
            .session
            .as_deref()
            .ok_or_else(|| CheckError::auth("not logged in"))?;

        let request = ApiRequest::get(url).with_session(Some(token));
        let body = self
            .transport
            .execute(&request)
            .map_err(|e| match e {
                CheckError::Fetch { reason, .. } => CheckError::fetch(name, reason),
                other => CheckError::fetch(name, other),
            })?;

        serde_json::from_str(&body)
            .map_err(|e| CheckError::fetch(name, format!("failed to parse response JSON: {}", e)))
    }
}

fn api_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CheckError::config(format!(
            "unsupported URL scheme '{}'",
            url.scheme()
        )));
    }

    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| CheckError::config(format!("'{}' cannot be used as a base URL", raw)))?
        .pop_if_empty()
        .extend(["api", "v1"]);
    Ok(url)
}

/// Extracts `user.session` from the login reply
fn session_token(body: &str) -> Result<String> {
    let reply: Value = serde_json::from_str(body)
        .map_err(|e| CheckError::auth(format!("failed to parse login response JSON: {}", e)))?;

    let user = reply
        .get("user")
        .ok_or_else(|| CheckError::auth("login response: missing 'user' field"))?;
    let user = user
        .as_object()
        .ok_or_else(|| CheckError::auth("login response: 'user' is not a JSON object"))?;
    let session = user
        .get("session")
        .ok_or_else(|| CheckError::auth("login response: missing 'session' token"))?;

    session
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CheckError::auth("login response: 'session' token is not a string"))
}
