use assert_matches::assert_matches;
use serde_json::json;

use check_netgear::netgear::Direction;
use check_netgear::CheckError;

use super::support::{self, FakeTransport};

#[test]
fn test_login_posts_credentials_under_user_key() {
    let transport = FakeTransport::new().reply("login", support::LOGIN_OK);
    let requests = transport.requests();
    let mut client = support::client(transport);

    client.login("admin", "secret").unwrap();
    assert!(client.is_authenticated());

    let requests = requests.borrow();
    assert_eq!(requests.len(), 1);
    let login = &requests[0];
    assert_eq!(login.method, reqwest::Method::POST);
    assert_eq!(login.url.as_str(), "http://192.168.0.239/api/v1/login");
    assert!(login.session.is_none());
    assert_eq!(
        login.body,
        Some(json!({"user": {"name": "admin", "password": "secret"}}))
    );
}

#[test]
fn test_login_without_user_object_fails() {
    let transport = FakeTransport::new().reply("login", r#"{"resp": {"respCode": 1}}"#);
    let mut client = support::client(transport);

    let err = client.login("admin", "wrong").unwrap_err();
    assert_matches!(err, CheckError::Auth(_));
    assert!(!client.is_authenticated());
}

#[test]
fn test_login_transport_failure_is_auth_error() {
    let transport = FakeTransport::new().fail("login", "timed out");
    let mut client = support::client(transport);

    let err = client.login("admin", "secret").unwrap_err();
    assert_matches!(err, CheckError::Auth(msg) if msg.contains("timed out"));
}

#[test]
fn test_fetches_carry_session_header() {
    let transport = FakeTransport::healthy();
    let requests = transport.requests();
    let client = support::logged_in(transport);

    client.device_info().unwrap();
    client.poe_status().unwrap();

    let requests = requests.borrow();
    for request in requests.iter().skip(1) {
        assert_eq!(request.method, reqwest::Method::GET);
        assert_eq!(request.session.as_deref(), Some("s3ss10n"));
    }
    assert_eq!(requests[2].url.as_str(), "http://192.168.0.239/api/v1/swcfg_poe");
}

#[test]
fn test_port_statistics_query() {
    let transport = FakeTransport::healthy();
    let requests = transport.requests();
    let client = support::logged_in(transport);

    let inbound = client.port_statistics(Direction::Inbound).unwrap();
    let outbound = client.port_statistics(Direction::Outbound).unwrap();
    assert_eq!(inbound.row(3).unwrap().in_drop_pkts, 250.0);
    assert_eq!(outbound.row(3).unwrap().out_total_pkts, 800.0);

    let requests = requests.borrow();
    assert_eq!(
        requests[1].url.as_str(),
        "http://192.168.0.239/api/v1/port_statistics?type=inbound&indexPage=1&pageSize=25"
    );
    assert_eq!(
        requests[2].url.as_str(),
        "http://192.168.0.239/api/v1/port_statistics?type=outbound&indexPage=1&pageSize=25"
    );
}

#[test]
fn test_device_info_decoding() {
    let client = support::logged_in(FakeTransport::healthy());
    let info = client.device_info().unwrap();

    assert_eq!(info.uptime().unwrap(), "1 days, 8 hrs, 40 mins, 35 secs");
    assert_eq!(info.cpu_usage().unwrap(), 5.2);
    assert_eq!(info.memory_usage().unwrap(), 32.65);
    assert_eq!(info.sensors().unwrap().len(), 3);
    assert_eq!(info.fans().unwrap()[0].speed, Some(2500.0));
}

#[test]
fn test_non_numeric_usage_is_an_error() {
    let body = r#"{"deviceInfo": {"cpu": [{"unit": 1, "usage": "busy"}]}}"#;
    let transport = FakeTransport::new()
        .reply("login", support::LOGIN_OK)
        .reply("device_info", body);
    let client = support::logged_in(transport);

    let info = client.device_info().unwrap();
    assert_matches!(info.cpu_usage(), Err(CheckError::Validation(_)));
}

#[test]
fn test_fetch_requires_login() {
    let transport = FakeTransport::healthy();
    let requests = transport.requests();
    let client = support::client(transport);

    assert_matches!(client.device_info(), Err(CheckError::Auth(_)));
    assert!(requests.borrow().is_empty());
}

#[test]
fn test_invalid_json_is_fetch_error() {
    let transport = FakeTransport::new()
        .reply("login", support::LOGIN_OK)
        .reply("swcfg_poe", "<html>502 Bad Gateway</html>");
    let client = support::logged_in(transport);

    let err = client.poe_status().unwrap_err();
    assert!(err.to_string().contains("failed to parse response JSON"));
    assert_matches!(err, CheckError::Fetch { endpoint, .. } if endpoint == "swcfg_poe");
}

#[test]
fn test_logout_swallows_errors_and_clears_session() {
    let transport = FakeTransport::new()
        .reply("login", support::LOGIN_OK)
        .fail("logout", "connection reset");
    let requests = transport.requests();
    let mut client = support::logged_in(transport);

    client.logout();
    assert!(!client.is_authenticated());

    // Nothing left to invalidate, so no second request
    client.logout();
    assert_eq!(
        support::requested_endpoints(&requests),
        vec!["login", "logout"]
    );
    assert_eq!(requests.borrow()[1].session.as_deref(), Some("s3ss10n"));
}
