//! End-to-end negotiation against the JSON people routes.

use axum::http::StatusCode;
use content_exchange::demo::people_routes;
use content_exchange::{Json, Problem, DEFAULT_BODY_LIMIT, PROBLEM_JSON};

mod common;
use common::{get, post, LANA_IN_JSON, LANA_OUT_JSON, LILLY_JSON};

#[tokio::test]
async fn test_get_no_accept() {
    let reply = get(people_routes(Json::new()), &[]).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type(), Some("application/json"));
    assert_eq!(reply.body, LILLY_JSON);
}

#[tokio::test]
async fn test_get_accept_json() {
    let reply = get(people_routes(Json::new()), &[("Accept", "application/json")]).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type(), Some("application/json"));
    assert_eq!(reply.body, LILLY_JSON);
}

#[tokio::test]
async fn test_get_accept_wildcards() {
    for accept in ["*/*", "application/*", "text/html, */*;q=0.1"] {
        let reply = get(people_routes(Json::new()), &[("Accept", accept)]).await;
        assert_eq!(reply.status, StatusCode::OK, "Accept: {}", accept);
        assert_eq!(reply.content_type(), Some("application/json"));
    }
}

#[tokio::test]
async fn test_get_accept_not_supported() {
    let reply = get(people_routes(Json::new()), &[("Accept", "foo/bar")]).await;

    assert_eq!(reply.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(reply.content_type(), Some(PROBLEM_JSON));
    assert_eq!(
        reply.body,
        r#"{"status":415,"type":"","title":"The accepted types are not supported (header 'Accept')","detail":"A request that accepts type(s) 'foo/bar' is not supported.","instance":""}"#
    );
}

#[tokio::test]
async fn test_post_no_content_type() {
    let reply = post(people_routes(Json::new()), &[], LANA_IN_JSON).await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.content_type(), Some("application/json"));
    assert_eq!(reply.body, LANA_OUT_JSON);
}

#[tokio::test]
async fn test_post_content_type_json() {
    for content_type in ["application/json", "application/json; charset=utf-8", "text/json", "*/*"] {
        let reply = post(people_routes(Json::new()), &[("Content-Type", content_type)], LANA_IN_JSON).await;
        assert_eq!(reply.status, StatusCode::CREATED, "Content-Type: {}", content_type);
        assert_eq!(reply.body, LANA_OUT_JSON);
    }
}

#[tokio::test]
async fn test_post_content_type_not_supported() {
    let reply = post(people_routes(Json::new()), &[("Content-Type", "foo/bar")], LANA_IN_JSON).await;

    assert_eq!(reply.status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(reply.content_type(), Some(PROBLEM_JSON));
    assert_eq!(
        reply.body,
        r#"{"status":406,"type":"","title":"The request type is not supported (header 'Content-Type')","detail":"A request of type 'foo/bar' is not supported.","instance":""}"#
    );
}

#[tokio::test]
async fn test_content_type_checked_before_accept() {
    let reply = post(
        people_routes(Json::new()),
        &[("Content-Type", "foo/bar"), ("Accept", "foo/bar")],
        LANA_IN_JSON,
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_post_malformed_body() {
    let reply = post(people_routes(Json::new()), &[], r#"{"first_name":"#).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.content_type(), Some(PROBLEM_JSON));
    let problem: Problem = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(problem.status_code(), 400);
    assert_eq!(problem.title(), "request body could not be parsed");
    assert_eq!(problem.detail(), "");
    assert!(!reply.body.contains("EOF"));
}

#[tokio::test]
async fn test_post_empty_body() {
    let reply = post(people_routes(Json::new()), &[], "").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_body_over_default_limit() {
    let oversized = format!("{}{}", " ".repeat(DEFAULT_BODY_LIMIT), LANA_IN_JSON);
    let reply = post(people_routes(Json::new()), &[], &oversized).await;

    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(reply.content_type(), Some(PROBLEM_JSON));
    let problem: Problem = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(problem.title(), "request body is too large");
}

#[tokio::test]
async fn test_post_body_over_custom_limit() {
    let app = || people_routes(Json::new().with_body_limit(LANA_IN_JSON.len()));

    let reply = post(app(), &[], LANA_IN_JSON).await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let padded = format!("{} ", LANA_IN_JSON);
    let reply = post(app(), &[], &padded).await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
}
