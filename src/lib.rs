//! LuminaView gallery service library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `github`: Thin client for the GitHub Contents API (import + export).
//! - `genai`: Thin client for the image/speech generation endpoints, plus
//!   the host key-selection capability.
//! - `gallery`: The in-memory image collection and viewer selection.
//! - `export`: Sequential export job with progress, log and cancellation.
//! - `utils`: Filename and data-URI helpers.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `GitHubClient`,
//! `GenClient`, `ImageCollection`, and `ImageEntry`.
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod gallery;
pub mod genai;
pub mod github;
pub mod utils;

pub use config::Config;
pub use gallery::collection::ImageCollection;
pub use gallery::entry::ImageEntry;
pub use genai::client::GenClient;
pub use github::client::GitHubClient;
