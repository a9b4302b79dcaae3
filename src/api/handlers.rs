//! Axum request handlers for the HTTP API.
//!
//! Each route is one user action from the gallery: list, upload, add by
//! URL, generate, analyze, import from GitHub, export to GitHub, and
//! lightbox-style selection/navigation.
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::export::job::{run_export, ExportTarget};
use crate::gallery::entry::ImageEntry;
use crate::genai::client::{AspectRatio, GenerateImageOptions};
use crate::github::urls::is_github_url;
use crate::utils::data_url::payload_of;

pub async fn root() -> &'static str {
    "LuminaView API"
}

pub async fn list_images(State(state): State<Arc<AppState>>) -> Json<Vec<ImageEntry>> {
    let collection = state.collection.read().await;
    Json(collection.entries().to_vec())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
    /// Raw base64 payload or a full `data:` URI.
    pub data: String,
    pub mime_type: String,
}

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UploadRequest>,
) -> AppResult<Json<ImageEntry>> {
    if payload.data.is_empty() {
        return Err(AppError::Validation("file data is required".to_string()));
    }
    let entry = ImageEntry::from_upload(
        &payload.file_name,
        payload_of(&payload.data),
        &payload.mime_type,
    );
    let mut collection = state.collection.write().await;
    collection.prepend(entry.clone());
    Ok(Json(entry))
}

#[derive(Deserialize)]
pub struct AddUrlsRequest {
    pub urls: Vec<String>,
}

pub async fn add_urls(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddUrlsRequest>,
) -> AppResult<Json<Vec<ImageEntry>>> {
    let urls: Vec<&str> = payload
        .urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .collect();
    if urls.is_empty() {
        return Err(AppError::Validation("at least one URL is required".to_string()));
    }

    let batch: Vec<ImageEntry> = urls.iter().map(|u| ImageEntry::from_added_url(u)).collect();
    let mut collection = state.collection.write().await;
    collection.prepend_batch(batch.clone());
    Ok(Json(batch))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub use_pro: bool,
}

pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> AppResult<Json<ImageEntry>> {
    if payload.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt is required".to_string()));
    }
    // Pro tier must not reach the network without a selected key.
    if payload.use_pro && !state.key_selection.has_selected_key() {
        return Err(AppError::KeyNotSelected);
    }

    let options = GenerateImageOptions {
        aspect_ratio: payload.aspect_ratio,
        use_pro: payload.use_pro,
    };
    let generated = state
        .gen_client
        .generate_image(&payload.prompt, options)
        .await
        .map_err(|e| match e {
            // An expired host session surfaces as a missing entity; point
            // the caller back at key selection.
            AppError::Generation(msg)
                if payload.use_pro && msg.contains("Requested entity was not found") =>
            {
                AppError::KeyNotSelected
            }
            other => other,
        })?;

    let entry = ImageEntry::from_generation(&payload.prompt, &generated.base64, &generated.mime_type);
    let mut collection = state.collection.write().await;
    collection.prepend(entry.clone());
    Ok(Json(entry))
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub id: String,
    pub prompt: Option<String>,
}

pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> AppResult<Json<Value>> {
    let entry = {
        let collection = state.collection.read().await;
        collection.get(&payload.id).cloned()
    }
    .ok_or_else(|| AppError::Validation(format!("unknown image id: {}", payload.id)))?;

    let mime_type = entry.mime_type.clone().unwrap_or_else(|| "image/jpeg".to_string());
    let content = match entry.base64_data {
        Some(data) => data,
        None => state.github_client.fetch_as_base64(&entry.url).await?,
    };

    let description = state
        .gen_client
        .analyze_image(&content, &mime_type, payload.prompt.as_deref())
        .await?;
    Ok(Json(json!({ "description": description })))
}

#[derive(Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

pub async fn generate_speech(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SpeechRequest>,
) -> AppResult<Json<Value>> {
    if payload.text.trim().is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }
    let audio = state.gen_client.generate_speech(&payload.text).await?;
    Ok(Json(json!({ "audio": audio })))
}

#[derive(Deserialize)]
pub struct ImportRequest {
    pub url: String,
}

pub async fn import_from_github(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ImportRequest>,
) -> AppResult<Json<Value>> {
    if !is_github_url(&payload.url) {
        return Err(AppError::Validation(format!(
            "not a GitHub URL: {}",
            payload.url
        )));
    }
    // Soft failures inside the adapter come back as an empty list.
    let urls = state.github_client.list_images(&payload.url).await;
    let batch: Vec<ImageEntry> = urls.iter().map(|u| ImageEntry::from_url(u)).collect();
    let found = batch.len();
    if found > 0 {
        let mut collection = state.collection.write().await;
        collection.prepend_batch(batch);
    }
    Ok(Json(json!({ "found": found })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub token: String,
    pub repo: String,
    #[serde(default)]
    pub folder_path: String,
}

pub async fn start_export(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExportRequest>,
) -> AppResult<Json<Value>> {
    let target = ExportTarget::from_form(&payload.token, &payload.repo, &payload.folder_path)?;

    let entries = {
        let collection = state.collection.read().await;
        collection.entries().to_vec()
    };
    let total = entries.len();

    if !state.export.begin(total).await {
        return Err(AppError::ExportInProgress);
    }

    let client = state.github_client.clone();
    let handle = state.export.clone();
    tokio::spawn(async move {
        let report = run_export(client, &handle, target, entries).await;
        tracing::info!(
            "Export finished: {} uploaded, {} failed, cancelled={}",
            report.uploaded,
            report.failed,
            report.cancelled
        );
    });

    Ok(Json(json!({ "started": true, "total": total })))
}

pub async fn export_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let status = state.export.snapshot().await;
    Json(json!(status))
}

pub async fn cancel_export(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.export.cancel();
    Json(json!({ "cancelled": true }))
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub id: Option<String>,
}

pub async fn get_selection(State(state): State<Arc<AppState>>) -> Json<Option<ImageEntry>> {
    let collection = state.collection.read().await;
    let mut selection = state.selection.write().await;
    Json(selection.current(&collection).cloned())
}

pub async fn set_selection(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SelectRequest>,
) -> AppResult<Json<Option<ImageEntry>>> {
    let collection = state.collection.read().await;
    let mut selection = state.selection.write().await;
    match payload.id {
        Some(id) => {
            if !selection.select(&id, &collection) {
                return Err(AppError::Validation(format!("unknown image id: {}", id)));
            }
            Ok(Json(collection.get(&id).cloned()))
        }
        None => {
            selection.clear();
            Ok(Json(None))
        }
    }
}

pub async fn select_next(State(state): State<Arc<AppState>>) -> Json<Option<ImageEntry>> {
    let collection = state.collection.read().await;
    let mut selection = state.selection.write().await;
    Json(selection.next(&collection).cloned())
}

pub async fn select_prev(State(state): State<Arc<AppState>>) -> Json<Option<ImageEntry>> {
    let collection = state.collection.read().await;
    let mut selection = state.selection.write().await;
    Json(selection.prev(&collection).cloned())
}
