use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pronounce_acquire::{DictionaryConfig, LocatorKind, PronunciationFetcher};
use pronounce_archive::{build_archive, ARCHIVE_NAME};
use pronounce_server::AppState;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pronounce")]
#[command(about = "Download US-English pronunciation clips from an online dictionary")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web form
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,

        #[command(flatten)]
        dictionary: DictionaryArgs,
    },

    /// Build the pronunciation archive for words given on the command line
    Fetch {
        /// Words to look up (quote multi-word entries)
        #[arg(required = true)]
        words: Vec<String>,

        /// Where to write the zip archive
        #[arg(short = 'O', long, default_value = ARCHIVE_NAME)]
        output: String,

        #[command(flatten)]
        dictionary: DictionaryArgs,
    },
}

#[derive(Args)]
struct DictionaryArgs {
    /// Dictionary site origin
    #[arg(long, default_value = pronounce_acquire::fetch::DEFAULT_ORIGIN)]
    origin: String,

    /// User-Agent header sent with every request
    #[arg(long, default_value = pronounce_acquire::fetch::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,

    /// How to find the audio reference in the page
    #[arg(long, default_value = "pattern", value_enum)]
    locator: Locator,
}

#[derive(Clone, clap::ValueEnum)]
enum Locator {
    /// Ordered text patterns over the raw HTML
    Pattern,
    /// Parsed DOM lookup (tolerates attribute reordering)
    Markup,
}

impl DictionaryArgs {
    fn fetcher(self) -> Result<PronunciationFetcher> {
        let locator = match self.locator {
            Locator::Pattern => LocatorKind::Pattern,
            Locator::Markup => LocatorKind::Markup,
        };
        let config = DictionaryConfig {
            origin: self.origin,
            user_agent: self.user_agent,
            timeout: Duration::from_secs(self.timeout_secs),
        };
        tracing::debug!(origin = %config.origin, timeout = ?config.timeout, "Dictionary client");
        PronunciationFetcher::new(config, locator.build()).context("Failed to build HTTP client")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn,hyper_util=info",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn,hyper_util=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Serve { bind, dictionary } => {
            let fetcher = dictionary.fetcher()?;
            tracing::info!(addr = %bind, origin = %fetcher.config().origin, "Starting web form");
            pronounce_server::serve(bind, AppState::new(fetcher)).await?;
        }
        Commands::Fetch {
            words,
            output,
            dictionary,
        } => {
            let words: Vec<String> = words
                .iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect();
            anyhow::ensure!(!words.is_empty(), "Please enter at least one word.");

            let fetcher = dictionary.fetcher()?;
            tracing::info!(words = words.len(), "Fetching pronunciations");
            let report = build_archive(&fetcher, &words).await?;

            std::fs::write(&output, &report.bytes)
                .with_context(|| format!("Failed to write {output}"))?;

            for skipped in &report.skipped {
                tracing::warn!(
                    word = %skipped.word,
                    transport = skipped.reason.is_transport(),
                    "No pronunciation: {}",
                    skipped.reason
                );
            }
            tracing::info!(
                path = %output,
                entries = report.entries.len(),
                skipped = report.skipped.len(),
                "Wrote pronunciation archive"
            );
        }
    }

    Ok(())
}
