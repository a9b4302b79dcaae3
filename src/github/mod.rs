pub mod client;
pub mod urls;

pub use client::GitHubClient;
