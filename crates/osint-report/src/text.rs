use osint_sentiment::{AnalysisReport, DistributionSummary};

const RULE: &str = "---------------------------------------------------------------";
const BANNER: &str = "\
+==============================================================+
|             SOCIAL MEDIA OSINT ANALYSIS SUMMARY              |
+==============================================================+";

/// Boxed plain-text summary: distribution, averages, and per-platform
/// breakdown.
#[must_use]
pub fn render_text(report: &AnalysisReport) -> String {
    let summary = &report.summary;
    let avg = &summary.average;

    let mut sections = vec![
        BANNER.to_string(),
        format!(
            "Keyword: \"{}\"\nGenerated: {}",
            report.keyword,
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    ];

    if report.is_empty() {
        sections.push(format!("No results for '{}'.", report.keyword));
    } else {
        sections.push(heading("OVERALL SENTIMENT DISTRIBUTION"));
        sections.push(distribution_lines(&summary.distribution, ""));
        sections.push(heading("AVERAGE SENTIMENT SCORES"));
        sections.push(format!(
            "Overall Sentiment: {}\n\
             Average Polarity: {} (range: -1 to 1)\n\
             Average Subjectivity: {} (range: 0 to 1)",
            avg.overall_sentiment.as_str().to_uppercase(),
            avg.avg_polarity,
            avg.avg_subjectivity,
        ));
        sections.push(heading("PLATFORM BREAKDOWN"));
        for (platform, d) in &summary.by_platform {
            sections.push(format!(
                "{}:\n{}",
                platform.as_str().to_uppercase(),
                distribution_lines(d, "  ")
            ));
        }
    }

    let failed: Vec<String> = report
        .sources
        .iter()
        .filter(|s| s.error.is_some() || s.count == 0)
        .map(|s| match &s.error {
            Some(e) => format!("{}: {} ({e})", s.platform, s.status.as_str()),
            None => format!("{}: {}", s.platform, s.status.as_str()),
        })
        .collect();
    if !failed.is_empty() {
        sections.push(heading("SOURCES WITHOUT RESULTS"));
        sections.push(failed.join("\n"));
    }

    sections.push(format!("{RULE}\nReport generated by the OSINT keyword monitor\n{RULE}"));
    sections.join("\n\n")
}

fn heading(title: &str) -> String {
    format!("{RULE}\n{title}\n{RULE}")
}

fn distribution_lines(d: &DistributionSummary, indent: &str) -> String {
    format!(
        "{indent}Total: {} posts\n\
         {indent}Positive: {} ({}%)\n\
         {indent}Negative: {} ({}%)\n\
         {indent}Neutral:  {} ({}%)",
        d.total, d.positive, d.positive_pct, d.negative, d.negative_pct, d.neutral, d.neutral_pct,
    )
}
