//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for convenience during development.
//! The generation API key has no default: its absence is fatal only for
//! generation, speech and analysis calls.
use std::env;

pub struct Config {
    pub genai_api_key: Option<String>,
    pub genai_api_url: String,
    pub github_api_url: String,
    pub github_raw_host: String,
    pub source_repo_url: String,
    pub api_host: String,
    pub api_port: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> Self {
        Config {
            genai_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            genai_api_url: env::var("GENAI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            github_raw_host: env::var("GITHUB_RAW_HOST")
                .unwrap_or_else(|_| "raw.githubusercontent.com".to_string()),
            source_repo_url: env::var("SOURCE_REPO_URL")
                .unwrap_or_else(|_| "https://github.com/jaymacmac/pica-pic".to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "8190".to_string()),
        }
    }

    /// Echo effective settings at startup. The API key itself is never
    /// printed, only whether one is present.
    pub fn print_env_vars(&self) {
        println!("GEMINI_API_KEY: {}", if self.genai_api_key.is_some() { "<set>" } else { "<unset>" });
        println!("GENAI_API_URL: {}", self.genai_api_url);
        println!("GITHUB_API_URL: {}", self.github_api_url);
        println!("GITHUB_RAW_HOST: {}", self.github_raw_host);
        println!("SOURCE_REPO_URL: {}", self.source_repo_url);
        println!("API_HOST: {}", self.api_host);
        println!("API_PORT: {}", self.api_port);
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
