//! Thin HTTP client for the GitHub Contents API.
//!
//! - `list_images` turns a pasted repository/tree/blob URL into directly
//!   fetchable image URLs; every failure degrades to an empty list.
//! - `upload_file` creates one file in a target repository via an
//!   authenticated PUT.
//! - `fetch_as_base64` pulls any URL's bytes and base64-encodes them for
//!   entries whose payload is not resident.
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::github::urls;

const USER_AGENT_VALUE: &str = "luminaview";

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    #[serde(rename = "type")]
    entry_type: String,
    download_url: Option<String>,
}

/// A path lookup returns an array for directories and a bare object when
/// the path points at a single file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ContentsEntry>),
    Single(ContentsEntry),
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
    raw_host: String,
}

impl GitHubClient {
    pub fn new(api_base: String, raw_host: String) -> Self {
        let base = api_base.trim_end_matches('/').to_string();
        GitHubClient {
            client: Client::new(),
            api_base: base,
            raw_host,
        }
    }

    /// Resolve a GitHub web URL to the image URLs behind it.
    ///
    /// Never fails: transport and API errors are logged, and the single-file
    /// `blob` fallback or an empty list is returned instead.
    pub async fn list_images(&self, url: &str) -> Vec<String> {
        match self.try_list_images(url).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("GitHub fetch error for {}: {}", url, e);
                if url.contains("/blob/") {
                    vec![urls::blob_to_raw(url, &self.raw_host)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    async fn try_list_images(&self, url: &str) -> AppResult<Vec<String>> {
        let locator = match urls::parse_repo_url(url) {
            Some(l) => l,
            // Not enough path segments: nothing to list, not an error.
            None => return Ok(Vec::new()),
        };

        let mut api_url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, locator.owner, locator.repo, locator.path
        );
        if !locator.reference.is_empty() {
            api_url.push_str(&format!("?ref={}", locator.reference));
        }
        tracing::debug!("Listing repository contents at {}", api_url);

        let response = self
            .client
            .get(&api_url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if !response.status().is_success() {
            return Err(AppError::GitHub(format!(
                "contents listing failed with status {}",
                response.status()
            )));
        }

        let contents: ContentsResponse = response.json().await.map_err(AppError::HttpClient)?;
        let found = match contents {
            ContentsResponse::Listing(entries) => entries
                .into_iter()
                .filter(|e| e.entry_type == "file" && urls::is_image_file(&e.name))
                .filter_map(|e| e.download_url)
                .collect(),
            ContentsResponse::Single(entry) => {
                if entry.entry_type == "file" && urls::is_image_file(&entry.name) {
                    entry.download_url.into_iter().collect()
                } else {
                    Vec::new()
                }
            }
        };
        Ok(found)
    }

    /// Create `file_name` under `folder` in `owner/repo` with the given
    /// base64 content. The token is used for this call only.
    ///
    /// No existence pre-check and no retry: GitHub decides what a second
    /// PUT to the same path means.
    pub async fn upload_file(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        folder: &str,
        file_name: &str,
        base64_content: &str,
    ) -> AppResult<()> {
        let path = if folder.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", folder, file_name)
        };
        let api_url = format!("{}/repos/{}/{}/contents/{}", self.api_base, owner, repo, path);

        let body = json!({
            "message": format!("Add {} via LuminaView", file_name),
            "content": base64_content,
        });

        let response = self
            .client
            .put(&api_url)
            .header(AUTHORIZATION, format!("token {}", token))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .json(&body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| format!("upload failed with status {}", status));
            Err(AppError::GitHub(message))
        }
    }

    /// Fetch a URL's bytes and return them base64-encoded.
    pub async fn fetch_as_base64(&self, url: &str) -> AppResult<String> {
        let bytes = self
            .client
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(AppError::HttpClient)?
            .error_for_status()
            .map_err(AppError::HttpClient)?
            .bytes()
            .await
            .map_err(AppError::HttpClient)?;
        Ok(STANDARD.encode(bytes))
    }
}
