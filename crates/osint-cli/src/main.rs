mod analyze;
mod platforms;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use osint_core::{Platform, ReportFormat};
use tracing_subscriber::EnvFilter;

use crate::analyze::AnalyzeArgs;

#[derive(Debug, Parser)]
#[command(name = "osint-cli")]
#[command(about = "Keyword sentiment monitor for Reddit, Twitter/X, and news")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect posts for a keyword, score them, and write reports
    Analyze {
        /// Keyword or phrase to search for
        keyword: String,

        /// Platforms to query (repeatable or comma-separated); defaults to all
        #[arg(long = "platform", short = 'p', value_delimiter = ',')]
        platforms: Vec<Platform>,

        /// Maximum posts per platform, at most 100 [default: MAX_POSTS_PER_PLATFORM]
        #[arg(long, short = 'l')]
        limit: Option<usize>,

        /// Report formats (json, html, text) [default: REPORT_FORMAT]
        #[arg(long = "format", short = 'f', value_delimiter = ',')]
        formats: Vec<ReportFormat>,

        /// Also write Plotly chart pages
        #[arg(long)]
        charts: bool,

        /// Directory for reports and charts [default: OUTPUT_DIRECTORY]
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Search `#keyword` instead of the plain keyword
        #[arg(long)]
        hashtag: bool,
    },
    /// Show which platforms are enabled and why
    Platforms,
    /// Check credentials, sources, and the output directory
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = osint_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze {
            keyword,
            platforms,
            limit,
            formats,
            charts,
            output_dir,
            hashtag,
        } => {
            analyze::run_analyze(
                &config,
                AnalyzeArgs {
                    keyword,
                    platforms,
                    limit,
                    formats,
                    charts,
                    output_dir,
                    hashtag,
                },
            )
            .await
        }
        Commands::Platforms => platforms::run_platforms(&config),
        Commands::Doctor => platforms::run_doctor(&config),
    }
}
