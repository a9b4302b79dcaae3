//! Router-level flows: ingestion ordering, selection navigation and
//! pre-network validation, exercised with `tower`'s `oneshot`.
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceExt;

use luminaview::api::routes::{router, AppState};
use luminaview::export::job::ExportHandle;
use luminaview::gallery::collection::{ImageCollection, Selection};
use luminaview::genai::keyselect::{KeySelection, StaticKeySelection};
use luminaview::{GenClient, GitHubClient};

/// App wired to unreachable providers: every covered flow here finishes
/// before any network call would go out.
fn app_with_keys(key_selection: Arc<dyn KeySelection>) -> Router {
    let state = Arc::new(AppState {
        github_client: GitHubClient::new(
            "http://127.0.0.1:1".to_string(),
            "raw.githubusercontent.com".to_string(),
        ),
        gen_client: GenClient::new("http://127.0.0.1:1".to_string(), None),
        key_selection,
        collection: RwLock::new(ImageCollection::new()),
        selection: RwLock::new(Selection::new()),
        export: Arc::new(ExportHandle::new()),
    });
    router(state)
}

fn app() -> Router {
    app_with_keys(Arc::new(StaticKeySelection(true)))
}

async fn send(app: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder().method(method).uri(path).body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).to_string(),
        ))
    };
    (status, value)
}

async fn upload(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/images/upload",
        Some(json!({ "fileName": format!("{}.png", name), "data": "QUJD", "mimeType": "image/png" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn root_banner() {
    let (status, body) = send(&app(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("LuminaView API".to_string()));
}

#[tokio::test]
async fn uploads_are_newest_first() {
    let app = app();
    upload(&app, "a").await;
    upload(&app, "b").await;
    upload(&app, "c").await;

    let (status, body) = send(&app, "GET", "/images", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["c", "b", "a"]);
    // wire form is camelCase with the data URI as the renderable url
    assert_eq!(body[0]["thumbnailUrl"], body[0]["url"]);
    assert_eq!(body[0]["source"], "upload");
    assert_eq!(body[0]["base64Data"], "QUJD");
}

#[tokio::test]
async fn upload_accepts_full_data_uri() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/images/upload",
        Some(json!({
            "fileName": "cat.png",
            "data": "data:image/png;base64,QUJD",
            "mimeType": "image/png",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base64Data"], "QUJD");
    assert_eq!(body["url"], "data:image/png;base64,QUJD");
}

#[tokio::test]
async fn url_batch_lands_in_front_in_input_order() {
    let app = app();
    upload(&app, "old").await;
    let (status, _) = send(
        &app,
        "POST",
        "/images/url",
        Some(json!({ "urls": ["http://pics.example/one.png", "http://pics.example/two.png"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/images", None).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["one", "two", "old"]);
    assert_eq!(body[0]["description"], "Added via URL import");
    assert_eq!(body[0]["source"], "url");
}

#[tokio::test]
async fn empty_url_batch_is_rejected() {
    let (status, _) = send(&app(), "POST", "/images/url", Some(json!({ "urls": ["  "] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn selection_navigates_toward_newest() {
    let app = app();
    upload(&app, "a").await;
    let b = upload(&app, "b").await;
    upload(&app, "c").await;

    let (status, selected) = send(
        &app,
        "POST",
        "/selection",
        Some(json!({ "id": b["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(selected["title"], "b");

    let (_, next) = send(&app, "POST", "/selection/next", None).await;
    assert_eq!(next["title"], "c");

    // already at the newest entry
    let (_, end) = send(&app, "POST", "/selection/next", None).await;
    assert_eq!(end, Value::Null);

    let (_, prev) = send(&app, "POST", "/selection/prev", None).await;
    assert_eq!(prev["title"], "b");

    let (_, current) = send(&app, "GET", "/selection", None).await;
    assert_eq!(current["title"], "b");
}

#[tokio::test]
async fn selecting_unknown_id_is_rejected() {
    let (status, body) = send(
        &app(),
        "POST",
        "/selection",
        Some(json!({ "id": "does-not-exist" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("unknown image id"));
}

#[tokio::test]
async fn clearing_selection_returns_null() {
    let app = app();
    let a = upload(&app, "a").await;
    send(&app, "POST", "/selection", Some(json!({ "id": a["id"] }))).await;
    let (status, cleared) = send(&app, "POST", "/selection", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared, Value::Null);
    let (_, current) = send(&app, "GET", "/selection", None).await;
    assert_eq!(current, Value::Null);
}

#[tokio::test]
async fn import_rejects_non_github_urls() {
    let (status, _) = send(
        &app(),
        "POST",
        "/import",
        Some(json!({ "url": "https://gitlab.com/acme/widgets" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn import_soft_failure_reports_zero_found() {
    // The provider is unreachable; the adapter degrades to an empty list
    // and the gallery simply stays as it was.
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/import",
        Some(json!({ "url": "https://github.com/acme/widgets" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], 0);
    let (_, images) = send(&app, "GET", "/images", None).await;
    assert_eq!(images.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn export_requires_token_and_repo_shape() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/export",
        Some(json!({ "token": "  ", "repo": "acme/widgets" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Personal Access Token is required.");

    for repo in ["acme", "acme/", "/widgets", "acme/widgets/extra"] {
        let (status, body) = send(
            &app,
            "POST",
            "/export",
            Some(json!({ "token": "ghp_x", "repo": repo })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "repo {:?}", repo);
        assert_eq!(body["error"], "Repository must be in 'username/repo' format.");
    }
}

#[tokio::test]
async fn export_status_starts_idle() {
    let (status, body) = send(&app(), "GET", "/export/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["running"], false);
    assert_eq!(body["done"], false);
    assert_eq!(body["progress"], 0);
}

#[tokio::test]
async fn generation_without_credential_is_precondition_failure() {
    let (status, _) = send(
        &app(),
        "POST",
        "/images/generate",
        Some(json!({ "prompt": "a cat" })),
    )
    .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
}

#[tokio::test]
async fn pro_generation_requires_selected_key() {
    let app = app_with_keys(Arc::new(StaticKeySelection(false)));
    let (status, body) = send(
        &app,
        "POST",
        "/images/generate",
        Some(json!({ "prompt": "a cat", "usePro": true })),
    )
    .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert!(body["error"].as_str().unwrap().contains("select"));
}

#[tokio::test]
async fn empty_prompt_and_text_are_rejected() {
    let app = app();
    let (status, _) = send(&app, "POST", "/images/generate", Some(json!({ "prompt": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "POST", "/speech", Some(json!({ "text": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
