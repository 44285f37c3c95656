use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use check_netgear::netgear::{ApiRequest, NetgearClient, Transport};
use check_netgear::{CheckConfig, CheckError, Result};

pub const BASE_URL: &str = "http://192.168.0.239";

pub const LOGIN_OK: &str = r#"{"user": {"name": "admin", "session": "s3ss10n"}, "resp": {"respCode": 0}}"#;

pub const DEVICE_INFO: &str = r#"
{
 "deviceInfo": {
  "name": "",
  "mac": "28:94:01:75:0D:62",
  "poe": true,
  "details": [{
    "unit": 1,
    "model": "M4250-8G2XF-PoE+",
    "upTime": "1 days, 8 hrs, 40 mins, 35 secs"
   }],
  "fan": [{
    "unit": 1,
    "details": [{ "id": 1, "desc": "FAN-1", "speed": 2500, "state": 3 }]
   }],
  "sensor": [{
    "unit": 1,
    "details": [
      { "id": 1, "desc": "sensor-System1", "temp": 43, "maxTemp": 81, "state": 2 },
      { "id": 2, "desc": "sensor-MAC", "temp": 44, "maxTemp": 81, "state": 2 },
      { "id": 3, "desc": "sensor-System2", "temp": 43, "maxTemp": 81, "state": 2 }
    ]
   }],
  "cpu": [{ "unit": 1, "usage": "5.20%" }],
  "memory": [{ "unit": 1, "usage": "32.65%" }]
 },
 "resp": { "respCode": 0, "respMsg": "Success", "status": "success" }
}"#;

pub const INBOUND: &str = r#"{"portStatistics": {"rows": [
    {"port": 1, "inTotalPkts": 5000, "inDropPkts": 0, "inOctets": 1048576},
    {"port": 2, "inTotalPkts": 0, "inDropPkts": 0, "inOctets": 0},
    {"port": 3, "inTotalPkts": 1000, "inDropPkts": 250, "inOctets": 65536}
]}}"#;

pub const OUTBOUND: &str = r#"{"portStatistics": {"rows": [
    {"port": 3, "outTotalPkts": 800, "outDropPkts": 0, "outOctets": 40960},
    {"port": 1, "outTotalPkts": 4000, "outDropPkts": 10, "outOctets": 524288},
    {"port": 2, "outTotalPkts": 0, "outDropPkts": 0, "outOctets": 0}
]}}"#;

pub const POE: &str = r#"{"poePortConfig": [
    {"port": "1", "enable": true, "currentPower": 15000, "powerLimit": 15000},
    {"port": "2", "enable": true, "currentPower": 4200, "powerLimit": 30000},
    {"port": "3", "enable": false, "currentPower": 0, "powerLimit": 30000}
]}"#;

enum Reply {
    Body(String),
    Fail(String),
}

/// Scripted transport keyed by the last path segment of the request URL.
/// Endpoints without a script fail like an unreachable switch.
#[derive(Default)]
pub struct FakeTransport {
    replies: HashMap<String, Reply>,
    outbound: Option<String>,
    requests: Rc<RefCell<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport answering every endpoint with the fixtures above
    pub fn healthy() -> Self {
        Self::new()
            .reply("login", LOGIN_OK)
            .reply("logout", "{}")
            .reply("device_info", DEVICE_INFO)
            .port_statistics(INBOUND, OUTBOUND)
            .reply("swcfg_poe", POE)
    }

    pub fn reply(mut self, endpoint: &str, body: &str) -> Self {
        self.replies
            .insert(endpoint.to_string(), Reply::Body(body.to_string()));
        self
    }

    pub fn fail(mut self, endpoint: &str, reason: &str) -> Self {
        self.replies
            .insert(endpoint.to_string(), Reply::Fail(reason.to_string()));
        self
    }

    /// Both directions share one path and differ by the `type` query
    pub fn port_statistics(mut self, inbound: &str, outbound: &str) -> Self {
        self.replies.insert(
            "port_statistics".to_string(),
            Reply::Body(inbound.to_string()),
        );
        self.outbound = Some(outbound.to_string());
        self
    }

    pub fn requests(&self) -> Rc<RefCell<Vec<ApiRequest>>> {
        Rc::clone(&self.requests)
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: &ApiRequest) -> Result<String> {
        self.requests.borrow_mut().push(request.clone());

        let endpoint = request
            .url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();

        let outbound = request
            .url
            .query_pairs()
            .any(|(k, v)| k == "type" && v == "outbound");
        if endpoint == "port_statistics" && outbound {
            if let Some(body) = &self.outbound {
                return Ok(body.clone());
            }
        }

        match self.replies.get(&endpoint) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Fail(reason)) => Err(CheckError::fetch(endpoint, reason)),
            None => Err(CheckError::fetch(endpoint, "connection refused")),
        }
    }
}

pub fn client(transport: FakeTransport) -> NetgearClient<FakeTransport> {
    NetgearClient::with_transport(BASE_URL, transport).unwrap()
}

pub fn logged_in(transport: FakeTransport) -> NetgearClient<FakeTransport> {
    let mut client = client(transport);
    client.login("admin", "secret").unwrap();
    client
}

pub fn config() -> CheckConfig {
    CheckConfig {
        username: "admin".to_string(),
        password: "secret".to_string(),
        ..Default::default()
    }
}

/// Paths requested so far, e.g. `["login", "device_info", "logout"]`
pub fn requested_endpoints(requests: &Rc<RefCell<Vec<ApiRequest>>>) -> Vec<String> {
    requests
        .borrow()
        .iter()
        .filter_map(|r| r.url.path_segments()?.next_back().map(str::to_string))
        .collect()
}
