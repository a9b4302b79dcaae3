use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use luminaview::genai::client::{AspectRatio, GenerateImageOptions};
use luminaview::utils::naming::{export_file_name, mime_from_extension};
use luminaview::{Config, GenClient, GitHubClient};

#[derive(Parser, Debug)]
#[command(name = "luminactl", about = "CLI for the LuminaView gallery service", version)]
struct Cli {
    /// Override GITHUB_API_URL
    #[arg(global = true, long)]
    github_api_url: Option<String>,

    /// Override GEMINI_API_KEY
    #[arg(global = true, long)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the image URLs behind a GitHub repository/tree/blob URL
    Import {
        /// GitHub web URL, e.g. https://github.com/owner/repo/tree/main/assets
        url: String,
        /// Output raw JSON instead of one URL per line
        #[arg(long)]
        json: bool,
    },
    /// Generate an image from a text prompt and save it
    Generate {
        /// Prompt text
        prompt: String,
        /// Aspect ratio: 1:1, 3:4, 4:3, 16:9 or 9:16
        #[arg(long, default_value = "1:1")]
        aspect_ratio: String,
        /// Use the high-quality pro model (2K output)
        #[arg(long)]
        pro: bool,
        /// Output path (defaults to ./generated.<ext>)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Generate speech audio for a text and save it
    Speech {
        /// Text to speak
        text: String,
        /// Output path (defaults to ./speech.pcm)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Upload local image files to a GitHub repository, one at a time
    Export {
        /// Personal access token; used for the calls only, never stored
        #[arg(long)]
        token: String,
        /// Target repository as owner/repo
        #[arg(long)]
        repo: String,
        /// Folder inside the repository (empty for the root)
        #[arg(long, default_value = "")]
        folder: String,
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();

    let mut conf = Config::new();
    if let Some(url) = cli.github_api_url {
        conf.github_api_url = url;
    }
    if let Some(key) = cli.api_key {
        conf.genai_api_key = Some(key);
    }

    match cli.command {
        Commands::Import { url, json } => {
            let client = GitHubClient::new(conf.github_api_url.clone(), conf.github_raw_host.clone());
            let found = client.list_images(&url).await;
            if json {
                println!("{}", serde_json::to_string(&found)?);
            } else if found.is_empty() {
                eprintln!("No images found at {}", url);
            } else {
                for u in found {
                    println!("{}", u);
                }
            }
            Ok(())
        }
        Commands::Generate { prompt, aspect_ratio, pro, out } => {
            let ratio: AspectRatio = aspect_ratio.parse()?;
            let client = GenClient::new(conf.genai_api_url.clone(), conf.genai_api_key.clone());
            let options = GenerateImageOptions { aspect_ratio: ratio, use_pro: pro };
            let image = match client.generate_image(&prompt, options).await {
                Ok(image) => image,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let bytes = STANDARD.decode(&image.base64)?;
            let extension = image.mime_type.split('/').nth(1).unwrap_or("png");
            let path = out.unwrap_or_else(|| PathBuf::from(format!("generated.{}", extension)));
            tokio::fs::write(&path, &bytes).await?;
            println!("Saved {} ({} bytes, {})", path.display(), bytes.len(), image.mime_type);
            Ok(())
        }
        Commands::Speech { text, out } => {
            let client = GenClient::new(conf.genai_api_url.clone(), conf.genai_api_key.clone());
            let audio = match client.generate_speech(&text).await {
                Ok(audio) => audio,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let bytes = STANDARD.decode(&audio)?;
            let path = out.unwrap_or_else(|| PathBuf::from("speech.pcm"));
            tokio::fs::write(&path, &bytes).await?;
            println!("Saved {} ({} bytes)", path.display(), bytes.len());
            Ok(())
        }
        Commands::Export { token, repo, folder, files } => {
            let (owner, repo_name) = match repo.split_once('/') {
                Some((o, r)) if !o.is_empty() && !r.is_empty() && !r.contains('/') => {
                    (o.to_string(), r.to_string())
                }
                _ => {
                    eprintln!("Repository must be in 'username/repo' format.");
                    std::process::exit(2);
                }
            };

            let client = GitHubClient::new(conf.github_api_url.clone(), conf.github_raw_host.clone());
            let total = files.len();
            let mut uploaded = 0usize;
            let mut failed = 0usize;

            // Same per-item tolerance as the service job: a failure is
            // counted and the remaining files are still attempted.
            for (i, file) in files.iter().enumerate() {
                let title = file
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "image".to_string());
                println!("Processing {}/{}: {}...", i + 1, total, title);

                let extension = file
                    .extension()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_else(|| "png".to_string());
                let mime = mime_from_extension(&extension);
                let file_name = export_file_name(&title, &Uuid::new_v4().to_string(), Some(&mime));

                let result = match tokio::fs::read(file).await {
                    Ok(bytes) => {
                        let content = STANDARD.encode(&bytes);
                        client
                            .upload_file(&token, &owner, &repo_name, &folder, &file_name, &content)
                            .await
                            .map_err(|e| e.to_string())
                    }
                    Err(e) => Err(e.to_string()),
                };

                match result {
                    Ok(()) => {
                        println!("Uploaded {} as {}", title, file_name);
                        uploaded += 1;
                    }
                    Err(e) => {
                        eprintln!("Failed: {} - {}", title, e);
                        failed += 1;
                    }
                }
            }

            println!("DONE! Uploaded: {}, Failed: {}", uploaded, failed);
            if failed > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
