//! Shared setup for router-level tests.

use accounts_db::{create_pool, run_migrations, DbRuntimeSettings};
use accounts_server::{app, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt; // for oneshot

pub const BASE_URL: &str = "/accounts";

/// A router backed by a fresh migrated database file.
///
/// Keep the struct alive for the duration of the test; dropping it removes
/// the database file.
pub struct TestApp {
    pub router: Router,
    _db_file: NamedTempFile,
}

impl TestApp {
    pub fn new() -> Self {
        let db_file = NamedTempFile::new().expect("failed to create temp db file");
        let db_path = db_file.path().to_str().expect("temp path should be utf-8");
        let pool = create_pool(db_path, DbRuntimeSettings::default()).expect("pool");
        {
            let conn = pool.get().expect("connection");
            run_migrations(&conn).expect("migrations");
        }

        Self {
            router: app(AppState { pool }),
            _db_file: db_file,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: &Value) -> Response<Body> {
        self.send_with_content_type(method, uri, body, "application/json")
            .await
    }

    pub async fn send_with_content_type(
        &self,
        method: Method,
        uri: &str,
        body: &Value,
        content_type: &str,
    ) -> Response<Body> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Creates `count` accounts and returns the created bodies in order.
    pub async fn create_accounts(&self, count: usize) -> Vec<Value> {
        let mut created = Vec::with_capacity(count);
        for n in 0..count {
            let resp = self.send_json(Method::POST, BASE_URL, &sample_account(n)).await;
            assert_eq!(resp.status(), 201, "could not create test account");
            created.push(body_json(resp).await);
        }
        created
    }
}

/// A valid account payload, distinct for each `n`.
pub fn sample_account(n: usize) -> Value {
    json!({
        "name": format!("Customer {n}"),
        "email": format!("customer{n}@example.com"),
        "address": format!("{n} Elm Street"),
        "phone_number": format!("555-02{:02}", n % 100),
        "date_joined": format!("2023-03-{:02}", n % 28 + 1),
    })
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable")
        .to_vec()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).expect("body should be json")
}
