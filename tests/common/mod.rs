//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

pub const LILLY_JSON: &str =
    r#"{"id":4573098657423896,"first_name":"Lilly","last_name":"Wachowski","birth_date":"1967-12-29"}"#;
pub const LANA_IN_JSON: &str = r#"{"first_name":"Lana","last_name":"Wachowski","birth_date":"1965-06-21"}"#;
pub const LANA_OUT_JSON: &str =
    r#"{"id":542857589043,"first_name":"Lana","last_name":"Wachowski","birth_date":"1965-06-21"}"#;

/// A response, fully buffered.
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Reply {
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }
}

/// Drive `app` with a single request in-process.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Reply {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: Router, headers: &[(&str, &str)]) -> Reply {
    send(app, Method::GET, "/", headers, None).await
}

pub async fn post(app: Router, headers: &[(&str, &str)], body: &str) -> Reply {
    send(app, Method::POST, "/", headers, Some(body)).await
}
