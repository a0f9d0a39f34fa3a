use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use portfolio_site::cms::CmsClient;
use portfolio_site::config::{CmsConfig, SiteConfig};
use portfolio_site::pages;
use portfolio_site::state::AppState;
use portfolio_site::templates::Templates;

fn test_state(cms_config: CmsConfig) -> Arc<AppState> {
    let templates = Templates {
        layout: "<html><body>{{ banner }}{{ content }}</body></html>".to_string(),
        banner: "<header>banner</header>".to_string(),
        home: "<div>{{ carousel }}</div>".to_string(),
        not_found: "<p>No post named {{slug}}</p>".to_string(),
    };
    let config = SiteConfig {
        cms: cms_config.clone(),
        port: 0,
        watermark: "Test".to_string(),
    };
    Arc::new(AppState {
        config,
        templates,
        cms: CmsClient::new(cms_config),
    })
}

fn cms_config(server: &MockServer, token: Option<&str>) -> CmsConfig {
    CmsConfig {
        base_url: server.base_url(),
        api_token: token.map(str::to_owned),
    }
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn proxy_returns_500_without_a_token_and_skips_the_network() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/blog-posts");
        then.status(200).json_body(json!({ "data": [] }));
    });

    let app = pages::app(test_state(cms_config(&server, None)));
    let (status, body) = get(app, "/api/blog-posts").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "error": "Server configuration error" }));
    mock.assert_hits(0);
}

#[tokio::test]
async fn proxy_passes_the_raw_payload_through() {
    let payload = json!({
        "data": [{ "id": 1, "title": "Hello", "slug": "hello", "content": "Body." }],
        "meta": { "pagination": { "total": 1 } }
    });

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/blog-posts")
            .query_param("populate", "*")
            .header("authorization", "Bearer test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(payload.clone());
    });

    let app = pages::app(test_state(cms_config(&server, Some("test-token"))));
    let (status, body) = get(app, "/api/blog-posts").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, payload);
}

#[tokio::test]
async fn proxy_keeps_the_upstream_status_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/blog-posts");
        then.status(403)
            .header("Content-Type", "application/json")
            .json_body(json!({ "error": { "message": "Forbidden" } }));
    });

    let app = pages::app(test_state(cms_config(&server, Some("bad-token"))));
    let (status, body) = get(app, "/api/blog-posts").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "error": "Forbidden" }));
}

#[tokio::test]
async fn blog_index_renders_the_empty_state_when_the_cms_is_down() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/blog-posts");
        then.status(500);
    });

    let app = pages::app(test_state(cms_config(&server, Some("test-token"))));
    let (status, body) = get(app, "/blog").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("No blog posts yet"));
}

#[tokio::test]
async fn unknown_slug_renders_the_not_found_page() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/blog-posts");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "data": [] }));
    });

    let app = pages::app(test_state(cms_config(&server, Some("test-token"))));
    let (status, body) = get(app, "/blog/missing-post").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("No post named missing-post"));
}

#[tokio::test]
async fn post_page_renders_the_normalized_post() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/blog-posts")
            .query_param("filters[slug][$eq]", "hello");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "data": [{
                "id": 1,
                "title": "Hello",
                "slug": "hello",
                "content": "# First\n\nA body.",
                "publishedAt": "2024-05-01T10:00:00.000Z",
                "author": { "data": { "attributes": { "name": "Dana" } } }
            }] }));
    });

    let app = pages::app(test_state(cms_config(&server, Some("test-token"))));
    let (status, body) = get(app, "/blog/hello").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<h1>Hello</h1>"));
    assert!(html.contains("<h1>First</h1>"));
    assert!(html.contains("Dana"));
    assert!(html.contains("min read"));
}

#[tokio::test]
async fn every_carousel_image_and_the_favicon_are_served() {
    let server = MockServer::start();
    let app = pages::app(test_state(cms_config(&server, None)));

    for src in pages::PORTFOLIO_IMAGES {
        let (status, _) = get(app.clone(), src).await;
        assert_eq!(status, StatusCode::OK, "{src} is not served");
    }

    let (status, _) = get(app, "/favicon.ico").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn homepage_embeds_the_carousel() {
    let server = MockServer::start();
    let app = pages::app(test_state(cms_config(&server, None)));
    let (status, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("id=\"carousel\""));
    assert!(html.contains("watermark-overlay"));
}
