//! Preflight and method gating, neither of which should ever reach Mailchimp.

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use crate::helpers::TestApp;

#[tokio::test]
async fn preflight_returns_204_with_cors_headers() -> Result<()> {
    let app = TestApp::spawn().await?;

    for path in ["/", "/api/mailchimp-signup", "/any/other/path"] {
        let res = app
            .http_client
            .request(Method::OPTIONS, app.url(path))
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::NO_CONTENT, "path: {path}");

        let headers = res.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");

        assert!(res.bytes().await?.is_empty(), "Preflight body should be empty");
    }

    assert_eq!(app.mailchimp_request_count().await, 0);

    Ok(())
}

#[tokio::test]
async fn preflight_skips_validation_even_without_secrets() -> Result<()> {
    let app = TestApp::spawn_with_secrets(Default::default()).await?;

    let res = app
        .http_client
        .request(Method::OPTIONS, app.url("/"))
        .body("this is not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    Ok(())
}

#[tokio::test]
async fn other_methods_return_405() -> Result<()> {
    let app = TestApp::spawn().await?;

    for method in [
        Method::GET,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ] {
        let res = app
            .http_client
            .request(method.clone(), app.url("/api/mailchimp-signup"))
            .json(&json!({ "email": "a@b.com" }))
            .send()
            .await?;

        assert_eq!(
            res.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "Wrong response: ({}), Expected: ({}); for method: {method}",
            res.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        let body: Value = res.json().await?;
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    assert_eq!(app.mailchimp_request_count().await, 0);

    Ok(())
}

#[tokio::test]
async fn responses_carry_a_request_id() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/")).send().await?;

    assert!(
        res.headers().contains_key("x-request-id"),
        "Missing 'x-request-id' header"
    );

    Ok(())
}
