//! Shared helpers for integration tests.
//!
//! Each test gets its own in-memory SQLite database and a temporary
//! storage directory, wired through the same `AppState::from_config`
//! path the server uses.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use lopdf::{content::Content, Document, Object};
use sea_orm::ConnectOptions;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use pdf_management_api::{api::create_router, infra::Database, AppState, Config};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const TEST_PASSWORD: &str = "SecurePass123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub config: Config,
    _storage: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let storage = tempfile::tempdir().unwrap();
    let storage_dir = storage.path().to_string_lossy().to_string();

    let config = Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "STORAGE_DIR" => Some(storage_dir.clone()),
        _ => None,
    })
    .unwrap();

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let database = Arc::new(Database::connect_with_options(options).await.unwrap());

    let state = AppState::from_config(database, &config);
    state.storage.init().await.unwrap();

    TestApp {
        router: create_router(state.clone()),
        state,
        config,
        _storage: storage,
    }
}

impl TestApp {
    /// Disk location of a stored PDF
    pub fn stored_path(&self, filename: &str) -> PathBuf {
        self.state.storage.pdf_dir().join(filename)
    }

    /// Send a request and return status plus raw body
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    /// Send a request and parse the JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send_raw(request).await;
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(authed(Method::GET, uri, token)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(authed(Method::DELETE, uri, token)).await
    }

    pub async fn register(&self, email: &str) -> (StatusCode, Value) {
        self.post_json(
            "/api/auth/register",
            json!({
                "name": "Jane Doe",
                "email": email,
                "password": TEST_PASSWORD,
                "address": "1 Main Street",
                "phone_number": "081234567890",
                "post_code": "12345",
                "role_id": 1
            }),
            None,
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/api/auth/login",
            json!({ "email": email, "password": password }),
            None,
        )
        .await
    }

    /// Register a fresh user and return a bearer token
    pub async fn token(&self) -> String {
        let (status, _) = self.register("owner@example.com").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self.login("owner@example.com", TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn upload(
        &self,
        token: &str,
        filename: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> (StatusCode, Value) {
        let (boundary_header, body) = multipart_body("file", filename, content_type, bytes);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/pdf/upload")
            .header(header::CONTENT_TYPE, boundary_header)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(body))
            .unwrap();

        self.send(request).await
    }
}

fn authed(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Single-file multipart body; returns (content-type header, body)
pub fn multipart_body(
    field: &str,
    filename: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> (String, Vec<u8>) {
    let boundary = "----pdf-test-boundary";
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (format!("multipart/form-data; boundary={}", boundary), body)
}

/// Text drawn on each page, in page order
pub fn pdf_page_texts(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|page_id| {
            let content = Content::decode(&doc.get_page_content(*page_id).unwrap()).unwrap();
            let mut text = String::new();
            for op in content.operations {
                let strings = match op.operator.as_str() {
                    "Tj" => op.operands,
                    "TJ" => match op.operands.into_iter().next() {
                        Some(Object::Array(items)) => items,
                        _ => Vec::new(),
                    },
                    _ => Vec::new(),
                };
                for object in strings {
                    if let Object::String(bytes, _) = object {
                        text.push_str(&String::from_utf8_lossy(&bytes));
                        text.push('\n');
                    }
                }
            }
            text
        })
        .collect()
}
