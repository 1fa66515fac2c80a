use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use repostar_core::{providers::GitHubProvider, Config, SearchProvider};
use repostar_tui::{item::format_date, App};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repostar")]
#[command(version, about = "Search GitHub repositories and keep a list of favorites", long_about = None)]
struct Cli {
    /// Config file to read instead of the default location
    #[arg(long, env = "REPOSTAR_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long, env = "REPOSTAR_API_URL", global = true)]
    api_url: Option<String>,

    /// Quiet period after typing before a search fires (ms)
    #[arg(long, env = "REPOSTAR_DEBOUNCE_MS", global = true)]
    debounce_ms: Option<u64>,

    /// Shortest query that triggers a search
    #[arg(long, env = "REPOSTAR_MIN_QUERY_LENGTH", global = true)]
    min_query_length: Option<usize>,

    /// Disable mouse capture in the TUI
    #[arg(long, global = true)]
    no_mouse: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run one search and print the results
    Search {
        /// Search query
        query: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the config file
    Config {
        /// Print the effective configuration
        #[arg(long)]
        show: bool,

        /// Write the default configuration to disk
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    /// File < env/flags
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(url) = &self.api_url {
            config.github.api_url = url.clone();
        }
        if let Some(ms) = self.debounce_ms {
            config.search.debounce_ms = ms;
        }
        if let Some(len) = self.min_query_length {
            config.search.min_query_length = len;
        }
        if self.no_mouse {
            config.ui.mouse_enabled = false;
        }

        Ok(config)
    }
}

/// The TUI owns the terminal, so its logs go to a file instead
fn init_logging(tui: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "repostar=info".into());

    if !tui {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(());
    }

    match dirs::cache_dir().map(|d| d.join("repostar")) {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("repostar.log"))
                .context("opening log file")?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.is_none())?;
    let config = cli.resolve_config()?;

    match cli.command {
        Some(Commands::Search { query, json }) => run_search(&config, &query, json).await,
        Some(Commands::Config { show, init }) => run_config(&config, show, init),
        None => {
            tracing::info!("starting TUI against {}", config.github.api_url);
            let provider: Arc<dyn SearchProvider> =
                Arc::new(GitHubProvider::new(&config.github.api_url)?);
            let app = App::new(&config.ui);
            repostar_tui::run_tui(app, provider, &config).await
        }
    }
}

async fn run_search(config: &Config, query: &str, json: bool) -> anyhow::Result<()> {
    let min = config.search.min_query_length;
    if query.chars().count() < min {
        anyhow::bail!("Query must be at least {} characters", min);
    }

    tracing::info!("Searching for: {}", query);
    let provider = GitHubProvider::new(&config.github.api_url)?;
    let records = provider.search(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No repositories found.");
        return Ok(());
    }

    for repo in &records {
        println!("{}  (#{})", repo.name, repo.id);
        if let Some(desc) = &repo.description {
            println!("  {}", desc);
        }
        println!(
            "  ★ {}  forks {}  {}",
            repo.stars,
            repo.forks,
            repo.language_label()
        );
        println!(
            "  created {}, updated {}",
            format_date(&repo.created_at),
            format_date(&repo.updated_at)
        );
        if let Some(url) = &repo.html_url {
            println!("  {}", url);
        }
        println!();
    }

    Ok(())
}

fn run_config(config: &Config, show: bool, init: bool) -> anyhow::Result<()> {
    if init {
        let path = config.save()?;
        println!("Wrote {}", path.display());
    }
    if show || !init {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ndebounce_ms = 900\nmin_query_length = 5\n").unwrap();

        let cli = Cli::parse_from([
            "repostar",
            "--config",
            path.to_str().unwrap(),
            "--min-query-length",
            "2",
            "--no-mouse",
            "search",
            "rust",
        ]);
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.search.debounce_ms, 900);
        assert_eq!(config.search.min_query_length, 2);
        assert!(!config.ui.mouse_enabled);
        assert!(matches!(
            cli.command,
            Some(Commands::Search { ref query, json: false }) if query == "rust"
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
