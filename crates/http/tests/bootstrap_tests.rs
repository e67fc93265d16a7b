//! Startup session restoration and route admission

mod common;

use common::context;
use serde_json::json;
use std::time::Duration;
use videoflix_core::tests::TestToken;
use videoflix_core::{Navigation, RouteError};
use videoflix_http::{ClientConfig, ClientContext};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_status(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/auth/status/"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_authenticated_session_is_restored() {
    let server = MockServer::start().await;
    let token = TestToken::new(42).encode();

    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"authenticated": true, "user_id": 42})),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": token})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    assert!(!ctx.readiness.is_ready());

    assert!(ctx.bootstrapper().run().await);
    assert!(ctx.readiness.is_ready());
    assert!(ctx.session.is_authenticated().current());
    assert_eq!(ctx.session.identity().unwrap().user_id, 42);

    let navigation = ctx.router.navigate("/home").await.unwrap();
    assert!(matches!(navigation, Navigation::Entered(_)));
    assert_eq!(ctx.history.current().as_deref(), Some("/home"));
}

#[tokio::test]
async fn test_unauthenticated_session_is_cleared() {
    let server = MockServer::start().await;

    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"authenticated": false})),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(&server);
    ctx.session.set_credential(TestToken::new(1).encode());

    assert!(!ctx.bootstrapper().run().await);
    assert!(ctx.readiness.is_ready());
    assert!(ctx.session.session().is_none());

    let navigation = ctx.router.navigate("/movie/5").await.unwrap();
    assert_eq!(
        navigation,
        Navigation::Redirected {
            to: "/startsite".to_string()
        }
    );
    assert_eq!(ctx.history.current().as_deref(), Some("/startsite"));
}

#[tokio::test]
async fn test_status_failure_clears_and_publishes_readiness() {
    let server = MockServer::start().await;
    mount_status(&server, ResponseTemplate::new(500)).await;

    let ctx = context(&server);
    ctx.session.set_credential(TestToken::new(1).encode());

    assert!(!ctx.bootstrapper().run().await);
    assert!(ctx.readiness.is_ready());
    assert!(!ctx.session.is_authenticated().current());
}

#[tokio::test]
async fn test_unreachable_backend_clears_and_publishes_readiness() {
    common::init_tracing();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut config = ClientConfig::default();
    config.api.base_url = format!("http://127.0.0.1:{port}/");
    let ctx = ClientContext::new(config).unwrap();
    ctx.session.set_credential(TestToken::new(1).encode());

    assert!(!ctx.bootstrapper().run().await);
    assert!(ctx.readiness.is_ready());
    assert!(ctx.session.session().is_none());
}

#[tokio::test]
async fn test_failed_refresh_leaves_session_unauthenticated() {
    let server = MockServer::start().await;

    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"authenticated": true})),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    assert!(!ctx.bootstrapper().run().await);
    assert!(ctx.readiness.is_ready());
    assert!(ctx.session.credential().is_none());
}

#[tokio::test]
async fn test_readiness_published_when_bootstrap_is_abandoned() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"authenticated": false}))
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let ctx = context(&server);
    let bootstrapper = ctx.bootstrapper();
    let result = tokio::time::timeout(Duration::from_millis(100), bootstrapper.run()).await;

    assert!(result.is_err());
    assert!(ctx.readiness.is_ready());
}

#[tokio::test]
async fn test_guarded_navigation_waits_for_bootstrap() {
    let server = MockServer::start().await;
    let token = TestToken::new(9).encode();

    mount_status(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"authenticated": true}))
            .set_delay(Duration::from_millis(50)),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": token})))
        .mount(&server)
        .await;

    let ctx = context(&server);
    let router = ctx.router.clone();
    let pending = tokio::spawn(async move { router.navigate("/home").await });

    tokio::task::yield_now().await;
    assert!(!pending.is_finished());

    ctx.bootstrapper().run().await;
    let navigation = pending.await.unwrap().unwrap();
    assert!(matches!(navigation, Navigation::Entered(_)));
}

#[tokio::test]
async fn test_public_and_unknown_routes() {
    let server = MockServer::start().await;
    let ctx = context(&server);

    // Public routes do not wait for readiness.
    let navigation = ctx.router.navigate("/login").await.unwrap();
    assert!(matches!(navigation, Navigation::Entered(_)));

    let err = ctx.router.navigate("/nowhere").await.unwrap_err();
    assert_eq!(err, RouteError::NotFound("/nowhere".to_string()));
}
