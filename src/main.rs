use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

use luminaview::{
    api,
    config,
    export,
    gallery,
    genai,
    github,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    config::Config::dotenv_load();
    let config = config::Config::new();
    config.print_env_vars();

    // Clients for the two external services
    let github_client =
        github::client::GitHubClient::new(config.github_api_url.clone(), config.github_raw_host.clone());
    let gen_client =
        genai::client::GenClient::new(config.genai_api_url.clone(), config.genai_api_key.clone());

    let state = Arc::new(api::routes::AppState {
        github_client,
        gen_client,
        key_selection: Arc::new(genai::keyselect::AmbientKeySelection),
        collection: RwLock::new(gallery::collection::ImageCollection::new()),
        selection: RwLock::new(gallery::collection::Selection::new()),
        export: Arc::new(export::job::ExportHandle::new()),
    });

    // Initial load from the source repository; readiness is not blocked on it.
    let source_repo_url = config.source_repo_url.clone();
    let initial_state = state.clone();
    tokio::spawn(async move {
        let urls = initial_state.github_client.list_images(&source_repo_url).await;
        if urls.is_empty() {
            tracing::warn!("No images found at {}", source_repo_url);
            return;
        }
        let entries: Vec<gallery::entry::ImageEntry> =
            urls.iter().map(|u| gallery::entry::ImageEntry::from_url(u)).collect();
        let count = entries.len();
        initial_state.collection.write().await.replace_all(entries);
        tracing::info!("Loaded {} images from {}", count, source_repo_url);
    });

    let app = api::routes::router(state);

    // Run our application with safe parsing
    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 8190", port_str);
        8190
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
