//! `analyze` command: collect, score, print, and write reports.

use std::path::PathBuf;
use std::time::Duration;

use osint_collectors::build_collectors;
use osint_core::{AppConfig, Platform, ReportFormat, SourcesConfig, MAX_POSTS_PER_PLATFORM};
use osint_report::ReportWriter;
use osint_sentiment::{run_analysis, summary_text, AnalysisReport, AnalysisRequest, SentimentAnalyzer};

#[derive(Debug)]
pub(crate) struct AnalyzeArgs {
    pub keyword: String,
    pub platforms: Vec<Platform>,
    pub limit: Option<usize>,
    pub formats: Vec<ReportFormat>,
    pub charts: bool,
    pub output_dir: Option<PathBuf>,
    pub hashtag: bool,
}

/// Resolve CLI flags against configuration defaults.
///
/// # Errors
///
/// Returns an error for a blank keyword or a zero limit. A limit above
/// [`MAX_POSTS_PER_PLATFORM`] is lowered to it with a warning.
pub(crate) fn build_request(config: &AppConfig, args: &AnalyzeArgs) -> anyhow::Result<AnalysisRequest> {
    let keyword = args.keyword.trim();
    if keyword.is_empty() {
        anyhow::bail!("keyword must not be empty");
    }
    let mut limit = args.limit.unwrap_or(config.max_posts_per_platform);
    if limit == 0 {
        anyhow::bail!("--limit must be greater than zero");
    }
    if limit > MAX_POSTS_PER_PLATFORM {
        tracing::warn!(
            requested = limit,
            max = MAX_POSTS_PER_PLATFORM,
            "--limit exceeds the per-request maximum, using the maximum"
        );
        limit = MAX_POSTS_PER_PLATFORM;
    }
    let platforms = if args.platforms.is_empty() {
        Platform::ALL.to_vec()
    } else {
        args.platforms.clone()
    };
    Ok(AnalysisRequest {
        keyword: keyword.to_string(),
        platforms,
        limit,
        hashtag: args.hashtag,
    })
}

/// Run the `analyze` command.
///
/// An analysis that finds nothing prints "no results" and succeeds.
///
/// # Errors
///
/// Returns an error for invalid arguments, an invalid sources file, or when
/// reports cannot be written.
pub(crate) async fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let request = build_request(config, &args)?;
    let sources = SourcesConfig::resolve(config.sources_path.as_deref())?;
    let collectors = build_collectors(config, &sources)?;

    let report = run_analysis(
        &collectors,
        &SentimentAnalyzer::new(),
        &request,
        Duration::from_secs(config.collector_timeout_secs),
    )
    .await;

    print_sources(&report);

    if report.is_empty() {
        println!("no results for '{}'", request.keyword);
        return Ok(());
    }

    println!();
    println!("{}", summary_text(&report.posts));

    let writer = ReportWriter::new(
        args.output_dir
            .unwrap_or_else(|| config.output_directory.clone()),
    );
    let formats = if args.formats.is_empty() {
        config.report_formats.clone()
    } else {
        args.formats
    };

    let mut written = writer.write_reports(&report, &formats)?;
    if args.charts {
        written.extend(writer.write_charts(&report)?);
    }

    println!();
    println!("files written to {}:", writer.output_dir().display());
    for path in &written {
        println!("  {}", path.display());
    }
    tracing::info!(count = written.len(), "reports written");

    Ok(())
}

fn print_sources(report: &AnalysisReport) {
    println!("{:<10}{:<13}{:<7}ERROR", "PLATFORM", "STATUS", "POSTS");
    for source in &report.sources {
        println!(
            "{:<10}{:<13}{:<7}{}",
            source.platform.as_str(),
            source.status.as_str(),
            source.count,
            source.error.as_deref().unwrap_or("-")
        );
    }
}
