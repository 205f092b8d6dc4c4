// Copyright (c) The Appstore Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use appstore::config::Config;
use appstore::context::Context;
use appstore::handlers::healthz::HealthInfo;
use appstore::routes;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use clap::Parser;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

const STABLE_INDEX: &str = r#"
apiVersion: v1
entries:
  mysql:
    - name: mysql
      version: 1.6.9
      appVersion: 5.7.30
      description: Fast, reliable, scalable, and easy to use open-source relational database system.
      keywords: [mysql, database, sql]
    - name: mysql
      version: 1.6.8
      appVersion: 5.7.30
      description: Fast, reliable, scalable, and easy to use open-source relational database system.
      keywords: [mysql, database, sql]
  wordpress:
    - name: wordpress
      version: 9.0.3
      appVersion: 5.3.2
      description: Web publishing platform for building blogs and websites.
      keywords: [cms]
"#;

/// Builds an app over a temporary repository index; the helm binary points
/// nowhere, so only operations that stay off the package manager succeed.
async fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("repositories.yaml"),
        "repositories:\n  - name: stable\n    url: https://charts.example.org\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("stable-index.yaml"), STABLE_INDEX).unwrap();
    std::fs::write(
        dir.path().join("subjects.yml"),
        "- id: test-namespace\n  subjects:\n    - \"fc:org:example.org\"\n",
    )
    .unwrap();

    let config = Config::parse_from([
        "appstore-server",
        "--helm-bin",
        "/nonexistent/helm-test-stub",
        "--repository-config",
        dir.path().join("repositories.yaml").to_str().unwrap(),
        "--repository-cache",
        dir.path().to_str().unwrap(),
        "--namespace-mappings",
        dir.path().join("subjects.yml").to_str().unwrap(),
    ]);

    let ctx = Arc::new(Context::new(config).await.unwrap());
    (dir, routes::build().with_state(ctx))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_healthz_reports_process_info() {
    let (_dir, app) = test_app().await;

    let response =
        app.oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: HealthInfo = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.pid, std::process::id());
    assert!(!health.version.is_empty());
}

#[tokio::test]
async fn test_package_index_groups_versions() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/api/v1/packages").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let packages = body_json(response).await;
    let packages = packages.as_array().unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0]["name"], "mysql");
    assert_eq!(packages[0]["version"], "1.6.9");
    assert_eq!(packages[0]["available_versions"], json!(["1.6.9", "1.6.8"]));
}

#[tokio::test]
async fn test_package_search() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/v1/packages?query=wordpress").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let packages = body_json(response).await;
    assert_eq!(packages.as_array().unwrap().len(), 1);
    assert_eq!(packages[0]["name"], "wordpress");

    let response = app
        .oneshot(Request::builder().uri("/api/v1/packages?query=no-such-chart").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_package_version_constraint() {
    let (_dir, app) = test_app().await;

    // %5E is an url-encoded caret
    let response = app
        .oneshot(Request::builder().uri("/api/v1/packages?version=%5E9").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let packages = body_json(response).await;
    assert_eq!(packages.as_array().unwrap().len(), 1);
    assert_eq!(packages[0]["name"], "wordpress");
}

#[tokio::test]
async fn test_package_detail_and_not_found() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/v1/packages/mysql").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let package = body_json(response).await;
    assert_eq!(package["name"], "mysql");
    assert_eq!(package["version"], "1.6.9");
    assert_eq!(package["repo"], "stable");

    let response = app
        .oneshot(Request::builder().uri("/api/v1/packages/unknown").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_install_rejects_invalid_json() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/releases")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_install_unknown_package_is_not_found() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/releases")
                .header("content-type", "application/json")
                .body(Body::from(json!({"package": "nope"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_install_with_oauth_client_requires_token() {
    let (_dir, app) = test_app().await;

    let body = json!({
        "package": "mysql",
        "namespace": "test-namespace",
        "values": {
            "secrets": {"dataporten": {
                "name": "my-app",
                "scopes_requested": ["groups"],
                "redirect_uri": ["https://my-app.example.org/callback"],
            }}
        }
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/releases")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "missing X-Dataporten-Token");
}

#[tokio::test]
async fn test_upgrade_rejects_invalid_json() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/v1/releases/excited-newt")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_namespaces_require_token() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/api/v1/namespaces").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "missing X-Dataporten-Token");
}

#[tokio::test]
async fn test_release_status_without_package_manager_is_an_error() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(
            Request::builder().uri("/api/v1/releases/excited-newt/status").body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_dashboard_index_renders_html() {
    let (_dir, app) = test_app().await;

    let response =
        app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type").unwrap().to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("mysql"));
    assert!(body.contains("wordpress"));
}

#[tokio::test]
async fn test_dashboard_unknown_package_renders_error_page() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/package/unknown/1.0.0").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let content_type = response.headers().get("content-type").unwrap().to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
}
