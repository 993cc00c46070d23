#![allow(clippy::unwrap_used)]
// Connection lifecycle of the production controller, against wiremock.

use std::time::Duration;

use secrecy::SecretString;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ucsm_core::{ConnectionState, Controller, ControllerConfig, CoreError, ErrorKind};

fn config(host: &str) -> ControllerConfig {
    let password = SecretString::from("password".to_string());
    let mut config = ControllerConfig::new(host, "admin", password);
    config.secure = false;
    config.timeout = Duration::from_secs(5);
    config
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/nuova"))
        .and(body_string_contains("<aaaLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<aaaLogin cookie="" response="yes" outCookie="1700000000/abc" outRefreshPeriod="600"/>"#,
        ))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn connect_then_read_vlans() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/nuova"))
        .and(body_string_contains(r#"classId="fabricVlan""#))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<configResolveClass cookie="" response="yes" classId="fabricVlan">
                 <outConfigs>
                   <fabricVlan dn="fabric/lan/net-vlan666" id="666" name="vlan666" sharing="none"/>
                   <fabricVlan dn="fabric/lan/B/net-vlan666-b" id="666" name="vlan666-b" sharing="none"/>
                   <fabricVlan dn="fabric/lan/net-default" id="1" name="default" sharing="none"/>
                 </outConfigs>
               </configResolveClass>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctrl = Controller::new(config(&server.uri()));
    assert_eq!(ctrl.state(), ConnectionState::Disconnected);
    ctrl.connect().await.unwrap();
    assert_eq!(ctrl.state(), ConnectionState::Connected);

    // Connecting again reuses the session.
    ctrl.connect().await.unwrap();

    let vlans = ctrl.show_vlan(666).await.unwrap();
    assert_eq!(vlans.len(), 2);
    assert_eq!(vlans[1].fabric.to_string(), "B");
    ctrl.show_vlan(1).await.unwrap();
}

#[tokio::test]
async fn rejected_credentials_are_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nuova"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<aaaLogin cookie="" response="yes" errorCode="551" errorDescr="Authentication failed"/>"#,
        ))
        .mount(&server)
        .await;

    let mut ctrl = Controller::new(config(&server.uri()));
    let err = ctrl.connect().await.unwrap_err();
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }), "got: {err:?}");
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(ctrl.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() {
    let mut ctrl = Controller::new(config("http://127.0.0.1:1"));
    let err = ctrl.connect().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection, "got: {err:?}");
}

#[tokio::test]
async fn http_failure_on_login_is_a_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nuova"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let mut ctrl = Controller::new(config(&server.uri()));
    let err = ctrl.connect().await.unwrap_err();
    match err {
        CoreError::ConnectionFailed { ref url, ref reason } => {
            assert!(url.ends_with("/nuova"), "url: {url}");
            assert!(reason.contains("503"), "reason: {reason}");
        }
        ref other => panic!("expected ConnectionFailed, got: {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Connection);
}
