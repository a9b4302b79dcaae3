//! Gallery entries and their construction from the four ingestion paths.
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::data_url::to_data_url;

/// How an entry got into the collection. Display-only provenance tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Upload,
    Generated,
    Sample,
    Url,
}

/// One gallery item.
///
/// `url` is always renderable: a remote URL for imported entries, a
/// `data:` URI for uploads and generations. `base64_data`/`mime_type` are
/// present only when the binary payload is already resident in memory;
/// pure URL imports fetch on demand at export time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub id: String,
    pub url: String,
    pub thumbnail_url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Epoch milliseconds. Recency only; display order is collection order.
    pub created_at: u64,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Last path segment with everything from the first dot stripped.
fn title_from_url(url: &str) -> Option<String> {
    let last = url.rsplit('/').next()?;
    let stem = last.split('.').next().unwrap_or(last);
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

fn truncate_title(prompt: &str) -> String {
    let mut title: String = prompt.chars().take(30).collect();
    if prompt.chars().count() > 30 {
        title.push_str("...");
    }
    title
}

impl ImageEntry {
    /// Entry for a URL found by the GitHub import listing.
    pub fn from_url(url: &str) -> Self {
        ImageEntry {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            thumbnail_url: url.to_string(),
            title: title_from_url(url).unwrap_or_else(|| "Image".to_string()),
            description: None,
            created_at: now_millis(),
            source: Source::Url,
            base64_data: None,
            mime_type: None,
        }
    }

    /// Entry for a URL the user added by hand.
    pub fn from_added_url(url: &str) -> Self {
        ImageEntry {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            thumbnail_url: url.to_string(),
            title: title_from_url(url).unwrap_or_else(|| "Image from URL".to_string()),
            description: Some("Added via URL import".to_string()),
            created_at: now_millis(),
            source: Source::Url,
            base64_data: None,
            mime_type: None,
        }
    }

    /// Entry for an uploaded file whose payload is already in memory.
    pub fn from_upload(file_name: &str, base64_data: &str, mime_type: &str) -> Self {
        let data_url = to_data_url(mime_type, base64_data);
        let title = file_name.split('.').next().unwrap_or(file_name);
        ImageEntry {
            id: Uuid::new_v4().to_string(),
            url: data_url.clone(),
            thumbnail_url: data_url,
            title: title.to_string(),
            description: None,
            created_at: now_millis(),
            source: Source::Upload,
            base64_data: Some(base64_data.to_string()),
            mime_type: Some(mime_type.to_string()),
        }
    }

    /// Entry for a generated image; titled by its prompt.
    pub fn from_generation(prompt: &str, base64_data: &str, mime_type: &str) -> Self {
        let data_url = to_data_url(mime_type, base64_data);
        ImageEntry {
            id: Uuid::new_v4().to_string(),
            url: data_url.clone(),
            thumbnail_url: data_url,
            title: truncate_title(prompt),
            description: Some(format!("Generated from prompt: \"{}\"", prompt)),
            created_at: now_millis(),
            source: Source::Generated,
            base64_data: Some(base64_data.to_string()),
            mime_type: Some(mime_type.to_string()),
        }
    }
}
