use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "cs-doc-pipeline";
pub const DEFAULT_SOLUTION_DIR: &str = "csharp-testdata-mini";

/// Which language-model backend produces summaries
#[derive(Debug, Clone, PartialEq)]
pub enum SummarizerConfig {
    OpenAi {
        base_url: String,
        api_key: String,
        model: String,
    },
    Ollama {
        host: String,
        model: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfluenceConfig {
    pub url: String,
    pub user: String,
    pub api_key: String,
    pub space_key: String,
    pub parent_page_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub solution_dir: PathBuf,
    pub extensions: Vec<String>,
    pub summarizer: SummarizerConfig,
    /// `None` publishes to stdout
    pub confluence: Option<ConfluenceConfig>,
    pub plastic_update: bool,
    pub plastic_branch: String,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).with_context(|| format!("{} must be set", key));

        let solution_dir = get("SOLUTION_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOLUTION_DIR));

        let extensions = source_extensions(get("SOURCE_EXTENSIONS"));

        let summarizer = match get("SUMMARIZER").as_deref().unwrap_or("openai") {
            "openai" => SummarizerConfig::OpenAi {
                base_url: get("OPENAI_BASE_URL")
                    .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
                api_key: require("OPENAI_API_KEY")?,
                model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-4".to_string()),
            },
            "ollama" => SummarizerConfig::Ollama {
                host: get("OLLAMA_HOST").unwrap_or_else(|| "http://127.0.0.1:11434".to_string()),
                model: get("OLLAMA_MODEL").unwrap_or_else(|| "llama3".to_string()),
            },
            other => anyhow::bail!("Unknown SUMMARIZER {:?}, expected openai or ollama", other),
        };

        let confluence = match get("CONFLUENCE_URL") {
            Some(url) => Some(ConfluenceConfig {
                url,
                user: require("CONFLUENCE_USER")?,
                api_key: require("CONFLUENCE_API_KEY")?,
                space_key: require("SPACE_KEY")?,
                parent_page_id: get("CONFLUENCE_PARENT_PAGE_ID"),
            }),
            None => None,
        };

        let plastic_update = match get("PLASTIC_UPDATE") {
            Some(v) => parse_bool(&v).context("PLASTIC_UPDATE")?,
            None => false,
        };

        Ok(Self {
            solution_dir,
            extensions,
            summarizer,
            confluence,
            plastic_update,
            plastic_branch: get("PLASTIC_BRANCH").unwrap_or_else(|| "main".to_string()),
        })
    }
}

/// Comma-separated extension list, defaulting to `cs`
pub fn source_extensions(value: Option<String>) -> Vec<String> {
    let extensions: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(|e| e.trim().trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .collect();

    if extensions.is_empty() {
        vec!["cs".to_string()]
    } else {
        extensions
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {:?}", other),
    }
}

/// Load .env files from multiple locations with priority order:
/// 1. Current working directory (project-specific config)
/// 2. XDG config directory ~/.config/cs-doc-pipeline/.env
///
/// Environment variables set directly in the shell always take highest priority.
pub fn load_env_files() {
    let cwd_env = std::env::current_dir().map(|p| p.join(".env")).ok();
    if let Some(path) = cwd_env {
        if path.exists() && dotenv::from_path(&path).is_ok() {
            tracing::debug!("Loaded .env from: {}", path.display());
            return;
        }
    }

    if let Some(config_dir) = get_xdg_config_dir() {
        let xdg_env = config_dir.join(APP_NAME).join(".env");
        if xdg_env.exists() && dotenv::from_path(&xdg_env).is_ok() {
            tracing::debug!("Loaded .env from: {}", xdg_env.display());
            return;
        }
    }

    tracing::debug!("No .env file found, using environment variables only");
}

/// Get XDG config directory, fallback to ~/.config
fn get_xdg_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}
