use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dr_core::config::{DEFAULT_ARXIV_URL, DEFAULT_BASE_URL, DEFAULT_FEED_URL, DEFAULT_MODEL};
use dr_core::{NewsFeed, PaperSearch, Result, Settings, SettingsInput};
use dr_inference::{summarize_with_settings, SummaryOutcome};
use dr_sources::logging::init_logging;
use dr_sources::{ArxivClient, FeedClient};
use dr_web::state::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE};
use dr_web::AppState;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Recent papers and AI news, with optional AI summaries", long_about = None)]
pub struct Cli {
    /// Provisioned API key; takes priority over anything entered in the dashboard
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// arXiv query endpoint
    #[arg(long, env = "RADAR_ARXIV_URL", default_value = DEFAULT_ARXIV_URL)]
    arxiv_url: String,
    /// News feed read by the news tab
    #[arg(long, env = "RADAR_FEED_URL", default_value = DEFAULT_FEED_URL)]
    feed_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the dashboard
    Serve {
        #[arg(long, env = "RADAR_BIND", default_value = "0.0.0.0:3000")]
        bind: SocketAddr,
        /// Browser sessions kept at once; the least recently used is evicted beyond this
        #[arg(long, env = "RADAR_MAX_SESSIONS", default_value_t = DEFAULT_MAX_SESSIONS)]
        max_sessions: usize,
        /// Seconds a session may sit unused before it is dropped
        #[arg(long, env = "RADAR_SESSION_IDLE_SECS", default_value_t = DEFAULT_SESSION_IDLE.as_secs())]
        session_idle_secs: u64,
    },
    /// Print the most recent papers matching the keywords
    Papers {
        #[command(flatten)]
        model: ModelArgs,
        /// Also request an AI summary of each paper
        #[arg(long)]
        summarize: bool,
    },
    /// Print the latest news entries
    News {
        #[command(flatten)]
        model: ModelArgs,
        /// Also request an AI summary of each entry
        #[arg(long)]
        summarize: bool,
    },
    /// Summarize a piece of text
    Summarize {
        #[command(flatten)]
        model: ModelArgs,
        text: String,
    },
}

#[derive(Args, Debug)]
struct ModelArgs {
    #[arg(long, env = "RADAR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, env = "RADAR_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
    /// Keyword to search for; repeat for several. The first one is the summary subject.
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,
}

impl ModelArgs {
    fn settings(&self, api_key: Option<&str>) -> Settings {
        let input = SettingsInput {
            api_key: None,
            base_url: Some(self.base_url.clone()),
            model_name: Some(self.model.clone()),
            keywords: (!self.keywords.is_empty()).then(|| self.keywords.join("\n")),
        };
        Settings::resolve(api_key, &input)
    }
}

fn print_summary(outcome: SummaryOutcome) {
    match outcome {
        SummaryOutcome::Unavailable => {}
        SummaryOutcome::Completed(text) => println!("    ✨ {}", text.replace('\n', "\n       ")),
        SummaryOutcome::Failed(text) => eprintln!("    ⚠️ {}", text),
    }
}

fn warn_if_unavailable(settings: &Settings, summarize: bool) {
    if let Some(warning) = settings.warning().filter(|_| summarize) {
        warn!("⚠️ {}", warning);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, max_sessions, session_idle_secs } => {
            let papers = Arc::new(ArxivClient::with_endpoint(&cli.arxiv_url)?);
            let news = Arc::new(FeedClient::with_url(&cli.feed_url)?);
            if cli.api_key.is_none() {
                info!("🔑 No provisioned API key, users must enter their own");
            }
            let state = AppState::new(papers, news, cli.api_key)
                .with_session_limits(max_sessions, Duration::from_secs(session_idle_secs));
            dr_web::run_server(bind, state).await?;
        }
        Commands::Papers { model, summarize } => {
            let settings = model.settings(cli.api_key.as_deref());
            warn_if_unavailable(&settings, summarize);
            let client = ArxivClient::with_endpoint(&cli.arxiv_url)?;
            let papers = client.search(&settings.keywords).await?;
            println!("Found {} recent papers", papers.len());
            for paper in papers {
                println!("📄 [{}] {}\n    {}", paper.date, paper.title, paper.link);
                if summarize {
                    print_summary(summarize_with_settings(&settings, &paper.summary).await);
                }
            }
        }
        Commands::News { model, summarize } => {
            let settings = model.settings(cli.api_key.as_deref());
            warn_if_unavailable(&settings, summarize);
            let feed = FeedClient::with_url(&cli.feed_url)?;
            for entry in feed.latest().await? {
                println!("🌍 [{}] {}\n    {}", entry.published_label(), entry.title, entry.link);
                if summarize {
                    print_summary(summarize_with_settings(&settings, &entry.summary_input()).await);
                }
            }
        }
        Commands::Summarize { model, text } => {
            let settings = model.settings(cli.api_key.as_deref());
            warn_if_unavailable(&settings, true);
            print_summary(summarize_with_settings(&settings, &text).await);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_keywords_override_defaults() {
        let cli = Cli::parse_from(["radar", "papers", "-k", "Embodied AI", "--keyword", "Lidar"]);
        let Commands::Papers { model, summarize } = cli.command else {
            panic!("expected papers command");
        };
        assert!(!summarize);
        let settings = model.settings(None);
        assert_eq!(settings.keywords, vec!["Embodied AI", "Lidar"]);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_headless_defaults_keywords_and_key() {
        let cli = Cli::parse_from(["radar", "--api-key", "sk-host", "summarize", "some text"]);
        let Commands::Summarize { model, text } = cli.command else {
            panic!("expected summarize command");
        };
        assert_eq!(text, "some text");
        let settings = model.settings(cli.api_key.as_deref());
        assert_eq!(settings.subject(), Some("Embodied AI"));
        assert!(settings.summaries_enabled());
    }

    #[test]
    fn test_serve_bind_address() {
        let cli = Cli::parse_from(["radar", "serve", "--bind", "127.0.0.1:8080"]);
        let Commands::Serve { bind, max_sessions, session_idle_secs } = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(bind.port(), 8080);
        assert_eq!(max_sessions, DEFAULT_MAX_SESSIONS);
        assert_eq!(session_idle_secs, 3600);
    }

    #[test]
    fn test_serve_session_limits() {
        let cli = Cli::parse_from(["radar", "serve", "--max-sessions", "16", "--session-idle-secs", "60"]);
        assert!(matches!(
            cli.command,
            Commands::Serve { max_sessions: 16, session_idle_secs: 60, .. }
        ));
    }
}
