#![allow(dead_code)]

use hudori_bridge::Bridge;
use hudori_common::config::BridgeConfig;
use wiremock::{MockServer, Request};

/// Bridge pointed at the mock backend.
pub fn bridge_for(server: &MockServer) -> Bridge {
    Bridge::new(BridgeConfig::default().with_base_url(server.uri())).expect("bridge should build")
}

/// Bridge pointed at a port nothing listens on.
pub fn unreachable_bridge() -> Bridge {
    Bridge::new(BridgeConfig::default().with_base_url("http://127.0.0.1:1")).expect("bridge should build")
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

pub async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.expect("request recording is on");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub filename: Option<String>,
    pub data: Vec<u8>,
}

impl FormPart {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.data).expect("text field")
    }
}

/// Read back a multipart/form-data request body, part by part, in wire order.
pub async fn parse_multipart(request: &Request) -> Vec<FormPart> {
    let content_type = header(request, "content-type").expect("content type");
    let boundary = multer::parse_boundary(content_type).expect("multipart boundary");
    let body = request.body.clone();
    let stream = futures_util::stream::once(async move { Ok::<_, std::convert::Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("well-formed multipart body") {
        let name = field.name().expect("part name").to_owned();
        let filename = field.file_name().map(str::to_owned);
        let data = field.bytes().await.expect("part data").to_vec();
        parts.push(FormPart { name, filename, data });
    }
    parts
}
