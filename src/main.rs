use anyhow::{Context, Result};
use clap::Parser;
use cs_doc_pipeline::checkout::PlasticCheckout;
use cs_doc_pipeline::cli::{self, Cli};
use cs_doc_pipeline::config::{self, Config, SummarizerConfig};
use cs_doc_pipeline::pipeline::Pipeline;
use cs_doc_pipeline::publisher::confluence::ConfluencePublisher;
use cs_doc_pipeline::publisher::{Publisher, StdoutPublisher};
use cs_doc_pipeline::summarizer::ollama::OllamaSummarizer;
use cs_doc_pipeline::summarizer::openai::OpenAiSummarizer;
use cs_doc_pipeline::summarizer::Summarizer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    config::load_env_files();

    // Logs go to stderr so published output on stdout stays clean
    let env_filter =
        EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    // After .env loading so SOLUTION_DIR from a .env file is honored
    let args = Cli::parse();

    if args.parse_only {
        let solution_dir = args
            .solution_dir
            .unwrap_or_else(|| PathBuf::from(config::DEFAULT_SOLUTION_DIR));
        let extensions = config::source_extensions(std::env::var("SOURCE_EXTENSIONS").ok());
        return cli::run_parse_only(&solution_dir, &extensions, &mut std::io::stdout().lock());
    }

    let config = Config::from_env().context("Invalid configuration")?;
    let solution_dir = args.solution_dir.unwrap_or_else(|| config.solution_dir.clone());

    if config.plastic_update {
        PlasticCheckout::new(&solution_dir, &config.plastic_branch)
            .update()
            .await?;
    }

    let pipeline = Pipeline::new(
        build_summarizer(&config.summarizer),
        build_publisher(&config),
        config.extensions.clone(),
    );

    tracing::info!("Documenting {}", solution_dir.display());
    let report = pipeline.run(&solution_dir).await?;
    if report.failures > 0 {
        anyhow::bail!("{} files failed, see log for details", report.failures);
    }

    Ok(())
}

fn build_summarizer(config: &SummarizerConfig) -> Arc<dyn Summarizer> {
    match config {
        SummarizerConfig::OpenAi {
            base_url,
            api_key,
            model,
        } => Arc::new(OpenAiSummarizer::new(base_url, api_key, model)),
        SummarizerConfig::Ollama { host, model } => Arc::new(OllamaSummarizer::new(host, model)),
    }
}

fn build_publisher(config: &Config) -> Arc<dyn Publisher> {
    match &config.confluence {
        Some(c) => Arc::new(ConfluencePublisher::new(
            &c.url,
            &c.user,
            &c.api_key,
            &c.space_key,
            c.parent_page_id.as_deref(),
        )),
        None => Arc::new(StdoutPublisher),
    }
}
