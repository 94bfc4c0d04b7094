//! Command implementations for the review daemon.
//!
//! Handles:
//! - start: load config, build providers and the knowledge base, serve HTTP
//! - demo: review the built-in sample and write the report to disk
//! - review: one-shot review of a JSON request file

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use review_embeddings::{
    EmbeddingModel, GeminiEmbedder, GeminiEmbedderConfig, HashEmbedder, GEMINI_BASE_URL,
};
use review_feedback::{ApiGenerator, ApiGeneratorConfig, MockGenerator, TextGenerator};
use review_report::{ReportAssembler, ReviewInput};
use review_retrieval::{builtin_catalog, load_catalog_file, load_knowledge_base, Retriever};
use review_service::{run_server_with_shutdown, AppState};
use review_types::{ProviderKind, Settings};

/// Load `.env`, then layered settings, then apply the global CLI overrides.
fn load_settings(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<Settings> {
    if let Ok(path) = dotenvy::dotenv() {
        eprintln!("Loaded environment from {}", path.display());
    }

    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    Ok(settings)
}

/// Initialize logging. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr so reports printed on stdout stay clean.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Build the full review pipeline.
///
/// Offline mode swaps in the hashing embedder and the mock generator, so no
/// credential or network access is needed. Otherwise a missing credential is
/// an error.
pub async fn build_assembler(settings: &Settings, offline: bool) -> Result<Arc<ReportAssembler>> {
    let provider = &settings.provider;
    let dimension = settings.knowledge.dimension;
    let provider_timeout = Duration::from_secs(provider.timeout_secs);

    let (embedder, generator): (Arc<dyn EmbeddingModel>, Arc<dyn TextGenerator>) = if offline {
        info!("Offline mode: hashing embedder and mock generator");
        (
            Arc::new(HashEmbedder::new(dimension)),
            Arc::new(MockGenerator::new()),
        )
    } else {
        let api_key = settings.resolve_api_key().context(
            "No API credential found. Set GEMINI_API_KEY (or REVIEW_PROVIDER__API_KEY) \
             in the environment or a .env file. Keys are available from \
             https://makersuite.google.com/app/apikey",
        )?;

        match provider.kind {
            ProviderKind::Gemini => {
                let base_url = provider
                    .base_url
                    .clone()
                    .unwrap_or_else(|| GEMINI_BASE_URL.to_string());

                let embedder = GeminiEmbedder::new(
                    GeminiEmbedderConfig::new(api_key.clone(), provider.embedding_model.clone())
                        .with_base_url(base_url.clone())
                        .with_dimension(dimension)
                        .with_timeout(provider_timeout),
                )
                .context("Failed to create embedding client")?;

                let generator = ApiGenerator::new(
                    ApiGeneratorConfig::gemini(api_key, provider.generation_model.clone())
                        .with_base_url(base_url)
                        .with_timeout(provider_timeout)
                        .with_gemini_json_mode(provider.json_mode),
                )
                .context("Failed to create generation client")?;

                (Arc::new(embedder), Arc::new(generator))
            }
            ProviderKind::Openai => {
                info!("OpenAI-compatible provider: embeddings use the local hashing embedder");
                let mut config =
                    ApiGeneratorConfig::openai(api_key, provider.generation_model.clone())
                        .with_timeout(provider_timeout);
                if let Some(base_url) = &provider.base_url {
                    config = config.with_base_url(base_url.clone());
                }
                let generator =
                    ApiGenerator::new(config).context("Failed to create generation client")?;

                (Arc::new(HashEmbedder::new(dimension)), Arc::new(generator))
            }
        }
    };

    let catalog = match &settings.knowledge.catalog_path {
        Some(path) => load_catalog_file(path).context("Failed to load knowledge catalog")?,
        None => builtin_catalog(),
    };

    let knowledge = load_knowledge_base(embedder.as_ref(), catalog)
        .await
        .context("Failed to build knowledge base")?;
    let retriever = Retriever::new(Arc::new(knowledge), embedder)
        .context("Knowledge base does not match the embedding model")?;

    Ok(Arc::new(
        ReportAssembler::new(Arc::new(retriever), generator)
            .with_max_concurrency(settings.review.max_concurrent_comments),
    ))
}

/// The sample review used by `demo`.
pub fn sample_review_input() -> ReviewInput {
    ReviewInput::new(
        "def get_active_users(users):\n    results = []\n    for u in users:\n        if u.is_active == True and u.profile_complete == True:\n            results.append(u)\n    return results",
        [
            "This is inefficient. Don't loop twice conceptually.",
            "Variable 'u' is a bad name.",
            "Boolean comparison '== True' is redundant.",
        ],
    )
}

/// Read a review request from a JSON file.
pub fn load_review_input(path: impl AsRef<Path>) -> Result<ReviewInput> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read review input {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid review input in {}", path.display()))
}

/// Produce the Markdown report for `input`.
///
/// Empty input is not an error here: the report is the reviewer's
/// missing-input message, as a user-facing result.
pub async fn render_review(assembler: &ReportAssembler, input: &ReviewInput) -> String {
    match assembler.assemble(input).await {
        Ok(report) => report,
        Err(e) => e.to_string(),
    }
}

/// Start the HTTP server and run until Ctrl+C or SIGTERM.
pub async fn start_server(
    config_path: Option<&str>,
    host_override: Option<&str>,
    port_override: Option<u16>,
    log_level_override: Option<&str>,
) -> Result<()> {
    let mut settings = load_settings(config_path, log_level_override)?;
    if let Some(host) = host_override {
        settings.host = host.to_string();
    }
    if let Some(port) = port_override {
        settings.port = port;
    }

    init_logging(&settings.log_level)?;

    info!("Empathetic code reviewer starting...");
    info!("Configuration:");
    info!("  HTTP address: {}", settings.http_addr());
    info!("  Provider: {:?}", settings.provider.kind);
    info!("  Generation model: {}", settings.provider.generation_model);
    info!("  Embedding model: {}", settings.provider.embedding_model);
    info!("  Log level: {}", settings.log_level);

    let addr: SocketAddr = settings
        .http_addr()
        .parse()
        .context("Invalid HTTP address")?;

    // The knowledge base is complete before the listener opens.
    let assembler = build_assembler(&settings, false).await?;
    let state = AppState::new(assembler).with_request_timeout(Duration::from_secs(
        settings.review.request_timeout_secs,
    ));

    run_server_with_shutdown(addr, state, shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Reviewer shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}

/// Review the built-in sample, print the report and write it to `output`.
pub async fn run_demo(
    config_path: Option<&str>,
    offline: bool,
    output: &str,
    log_level_override: Option<&str>,
) -> Result<()> {
    let settings = load_settings(config_path, log_level_override)?;
    init_logging(&settings.log_level)?;

    let assembler = build_assembler(&settings, offline).await?;

    eprintln!("Processing code review...");
    let report = render_review(&assembler, &sample_review_input()).await;

    println!("{}", report);
    fs::write(output, &report).with_context(|| format!("Failed to write report to {}", output))?;
    eprintln!("Report saved to {}", output);
    Ok(())
}

/// Review a request file and print the report.
pub async fn run_review(
    config_path: Option<&str>,
    input_path: &str,
    offline: bool,
    log_level_override: Option<&str>,
) -> Result<()> {
    let settings = load_settings(config_path, log_level_override)?;
    init_logging(&settings.log_level)?;

    let input = load_review_input(input_path)?;
    let assembler = build_assembler(&settings, offline).await?;

    println!("{}", render_review(&assembler, &input).await);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn offline_settings() -> Settings {
        let mut settings = Settings::default();
        settings.knowledge.dimension = 256;
        settings
    }

    #[tokio::test]
    async fn test_offline_demo_report() {
        let assembler = build_assembler(&offline_settings(), true).await.unwrap();
        let report = render_review(&assembler, &sample_review_input()).await;

        assert!(report.starts_with("# Empathetic Code Review Report"));
        assert!(report.contains("def get_active_users(users):"));
        assert!(report.contains(
            "### Analysis of Comment 1: \"This is inefficient. Don't loop twice conceptually.\""
        ));
        assert!(report.contains("### Analysis of Comment 3: \"Boolean comparison '== True' is redundant.\""));
        assert!(report.contains("## Overall Summary"));
    }

    #[tokio::test]
    async fn test_empty_input_renders_message() {
        let assembler = build_assembler(&offline_settings(), true).await.unwrap();
        let report = render_review(&assembler, &ReviewInput::new("x = 1", Vec::<String>::new())).await;
        assert_eq!(report, "Error: Missing code snippet or review comments.");
    }

    #[tokio::test]
    async fn test_custom_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"content": "Prefer enumerate over manual index counters.", "category": "pythonic", "resource_link": "https://docs.python.org/3/library/functions.html#enumerate"}}]"#
        )
        .unwrap();

        let mut settings = offline_settings();
        settings.knowledge.catalog_path = Some(file.path().to_string_lossy().into_owned());

        let assembler = build_assembler(&settings, true).await.unwrap();
        let report = render_review(
            &assembler,
            &ReviewInput::new("i = 0\nfor x in xs:\n    i += 1", ["Use enumerate instead of a manual counter"]),
        )
        .await;
        assert!(report.contains("https://docs.python.org/3/library/functions.html#enumerate"));
    }

    #[tokio::test]
    async fn test_missing_catalog_file_fails() {
        let mut settings = offline_settings();
        settings.knowledge.catalog_path = Some("/nonexistent/catalog.json".to_string());
        assert!(build_assembler(&settings, true).await.is_err());
    }

    #[test]
    fn test_load_review_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"code_snippet": "fn main() {{}}", "review_comments": ["Add docs"], "language": "rust"}}"#
        )
        .unwrap();

        let input = load_review_input(file.path()).unwrap();
        assert_eq!(input.review_comments, vec!["Add docs"]);
        assert_eq!(input.language(), "rust");
    }

    #[test]
    fn test_load_review_input_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_review_input(file.path()).is_err());
    }
}
