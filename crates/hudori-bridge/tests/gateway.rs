mod support;

use std::sync::Arc;

use hudori_bridge::{FileAttachment, Gateway, GatewayError, MultipartBody, Payload, SessionState};
use hudori_common::config::BridgeConfig;
use reqwest::Method;
use serde_json::json;
use support::{header, only_request, parse_multipart};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway() -> Gateway {
    Gateway::new(&BridgeConfig::default().api, Arc::new(SessionState::new())).expect("client should build")
}

async fn backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn session_credentials_are_attached() {
    let server = backend().await;
    let gw = gateway();
    gw.session().set("tok123", "u1");

    let url = format!("{}/profile", server.uri());
    let response = gw.execute(Method::GET, &url, Payload::NoBody, None).await.unwrap();
    assert_eq!(response.status(), 200);

    let request = only_request(&server).await;
    assert_eq!(header(&request, "authorization"), Some("Bearer tok123"));
    assert_eq!(header(&request, "x-user-id"), Some("u1"));
    assert_eq!(request.url.path(), "/profile");
}

#[tokio::test]
async fn json_body_is_sent_verbatim() {
    let server = backend().await;
    let gw = gateway();

    let url = format!("{}/api/v1/server/create", server.uri());
    gw.execute(Method::POST, &url, Payload::Json(json!({ "name": "alice" })), None)
        .await
        .unwrap();

    let request = only_request(&server).await;
    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(header(&request, "content-type"), Some("application/json"));
    assert_eq!(request.body, br#"{"name":"alice"}"#);
}

#[tokio::test]
async fn empty_payload_carries_no_encoder_content_type() {
    let server = backend().await;
    let gw = gateway();

    for verb in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let url = format!("{}/nobody", server.uri());
        gw.execute(verb, &url, Payload::NoBody, None).await.unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    for request in requests {
        assert!(header(&request, "content-type").is_none(), "{} set a content type", request.method);
        assert!(request.body.is_empty());
    }
}

#[tokio::test]
async fn multipart_fields_and_files_survive_the_trip() {
    let server = backend().await;
    let gw = gateway();

    let binary: Vec<u8> = (0..=255u8).chain([b'\r', b'\n', 0, 0]).collect();
    let form = MultipartBody::new()
        .field("cropY", "10")
        .field("cropX", "20")
        .field("old_banner", "banners/old.png")
        .file("banner", FileAttachment::new("new.png", binary.clone()))
        .file("thumb", FileAttachment::new("t.txt", b"tiny".to_vec()));

    let url = format!("{}/api/v1/user/change_banner", server.uri());
    gw.execute(Method::POST, &url, Payload::Multipart(form), None).await.unwrap();

    let request = only_request(&server).await;
    assert!(header(&request, "content-type").unwrap().starts_with("multipart/form-data; boundary="));

    let parts = parse_multipart(&request).await;
    assert_eq!(parts.len(), 5);

    let fields: Vec<_> = parts.iter().filter(|p| p.filename.is_none()).collect();
    assert_eq!(fields.len(), 3);
    assert_eq!((fields[0].name.as_str(), fields[0].text()), ("cropY", "10"));
    assert_eq!((fields[1].name.as_str(), fields[1].text()), ("cropX", "20"));
    assert_eq!((fields[2].name.as_str(), fields[2].text()), ("old_banner", "banners/old.png"));

    let banner = parts.iter().find(|p| p.name == "banner").unwrap();
    assert_eq!(banner.filename.as_deref(), Some("new.png"));
    assert_eq!(banner.data, binary);

    let thumb = parts.iter().find(|p| p.name == "thumb").unwrap();
    assert_eq!(thumb.filename.as_deref(), Some("t.txt"));
    assert_eq!(thumb.data, b"tiny");
}

#[tokio::test]
async fn invalid_multipart_sends_nothing() {
    let server = backend().await;
    let gw = gateway();

    let form = MultipartBody::new().field("dup", "1").field("dup", "2");
    let url = format!("{}/upload", server.uri());
    let err = gw
        .execute(Method::POST, &url, Payload::Multipart(form), None)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidPayload(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    let gw = gateway();
    let err = gw
        .execute(Method::GET, "http://127.0.0.1:1/profile", Payload::NoBody, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::TransportFailed(_)));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn backend_errors_are_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "nope" })))
        .mount(&server)
        .await;

    let gw = gateway();
    let response = gw
        .execute(Method::GET, &format!("{}/missing", server.uri()), Payload::NoBody, None)
        .await
        .expect("a 404 is still a response");
    assert_eq!(response.status(), 404);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_session_swaps_never_split_credentials() {
    let server = backend().await;
    let gw = gateway();
    gw.session().set("tok-a", "user-a");

    let writer = {
        let session = Arc::clone(gw.session());
        tokio::spawn(async move {
            for i in 0..500 {
                if i % 2 == 0 {
                    session.set("tok-b", "user-b");
                } else {
                    session.set("tok-a", "user-a");
                }
                tokio::task::yield_now().await;
            }
        })
    };

    let calls: Vec<_> = (0..50)
        .map(|_| {
            let gw = gw.clone();
            let url = format!("{}/profile", server.uri());
            tokio::spawn(async move { gw.execute(Method::GET, &url, Payload::NoBody, None).await })
        })
        .collect();

    for call in calls {
        call.await.unwrap().unwrap();
    }
    writer.await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 50);
    for request in requests {
        let token = header(&request, "authorization").unwrap();
        let user = header(&request, "x-user-id").unwrap();
        match token {
            "Bearer tok-a" => assert_eq!(user, "user-a"),
            "Bearer tok-b" => assert_eq!(user, "user-b"),
            other => panic!("unexpected token {other}"),
        }
    }
}
