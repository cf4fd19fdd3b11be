//! Shared test utilities for docgen-ui integration tests

#![allow(dead_code)]

pub mod mock_backend;

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request};
use docgen_ui::client::BackendClient;
use docgen_ui::session::SessionStore;
use docgen_ui::workflow::ClientWorkflow;
use docgen_ui::AppState;

pub use mock_backend::MockBackend;

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n";

const BOUNDARY: &str = "docgen-test-boundary";
const TEST_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

pub fn workflow_for(backend: &MockBackend) -> ClientWorkflow {
    let client = BackendClient::new(backend.base_url.clone(), Some(Duration::from_secs(5)))
        .expect("Should create backend client");
    ClientWorkflow::new(client, SessionStore::new())
}

pub fn app_state_for(backend: &MockBackend) -> AppState {
    AppState::new(workflow_for(backend), TEST_UPLOAD_LIMIT)
}

/// Base URL with nothing listening on it
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind");
    let addr = listener.local_addr().expect("Should have local address");
    drop(listener);
    format!("http://{}", addr)
}

/// A multipart part: (field name, optional (filename, content type), data)
pub struct Part<'a> {
    pub name: &'a str,
    pub file: Option<(&'a str, &'a str)>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file: None,
            data: value.as_bytes(),
        }
    }

    pub fn file(filename: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "file",
            file: Some((filename, content_type)),
            data,
        }
    }
}

/// Build a multipart/form-data POST request
pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file {
            Some((filename, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        part.name, filename, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .expect("Should build request")
}

/// Standard upload form: demo.mp3 with the given selectors
pub fn upload_request(uri: &str, doc_type: &str, doc_level: &str) -> Request<Body> {
    multipart_request(
        uri,
        &[
            Part::text("doc_type", doc_type),
            Part::file("demo.mp3", "audio/mpeg", b"ID3\x04fake-mp3-bytes"),
            Part::text("doc_level", doc_level),
        ],
    )
}
