use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use osint_core::ReportFormat;
use osint_sentiment::AnalysisReport;

use crate::charts::{chart_figure, chart_page, ChartKind};
use crate::error::ReportError;
use crate::naming::{chart_file_name, report_file_name};
use crate::{html, json, text};

/// Writes report and chart files into one output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory and prove it is writable by creating and
    /// removing a probe file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::CreateDir`] or [`ReportError::Write`].
    pub fn check_writable(&self) -> Result<(), ReportError> {
        self.ensure_dir()?;
        let probe = self.output_dir.join(".osint_write_probe");
        fs::write(&probe, b"").map_err(|source| ReportError::Write {
            path: probe.clone(),
            source,
        })?;
        fs::remove_file(&probe).map_err(|source| ReportError::Write {
            path: probe,
            source,
        })
    }

    /// Write one file per requested format. Returns the paths written, in
    /// format order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the directory cannot be created, a file
    /// cannot be written, or JSON serialization fails.
    pub fn write_reports(
        &self,
        report: &AnalysisReport,
        formats: &[ReportFormat],
    ) -> Result<Vec<PathBuf>, ReportError> {
        self.write_reports_at(report, formats, Local::now())
    }

    fn write_reports_at(
        &self,
        report: &AnalysisReport,
        formats: &[ReportFormat],
        at: DateTime<Local>,
    ) -> Result<Vec<PathBuf>, ReportError> {
        self.ensure_dir()?;
        let mut written = Vec::with_capacity(formats.len());
        for &format in formats {
            let contents = match format {
                ReportFormat::Json => json::render_json(report)?,
                ReportFormat::Html => html::render_html(report),
                ReportFormat::Text => text::render_text(report),
            };
            let path = self
                .output_dir
                .join(report_file_name(&report.keyword, at, format));
            self.write_file(&path, &contents)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Write one HTML page per chart that has data. An empty report writes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the directory cannot be created or a file
    /// cannot be written.
    pub fn write_charts(&self, report: &AnalysisReport) -> Result<Vec<PathBuf>, ReportError> {
        self.write_charts_at(report, Local::now())
    }

    fn write_charts_at(
        &self,
        report: &AnalysisReport,
        at: DateTime<Local>,
    ) -> Result<Vec<PathBuf>, ReportError> {
        let figures: Vec<(ChartKind, serde_json::Value)> = ChartKind::ALL
            .iter()
            .filter_map(|&kind| chart_figure(kind, report).map(|figure| (kind, figure)))
            .collect();
        if figures.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_dir()?;
        let mut written = Vec::with_capacity(figures.len());
        for (kind, figure) in figures {
            let path = self
                .output_dir
                .join(chart_file_name(kind.slug(), &report.keyword, at));
            self.write_file(&path, &chart_page(&kind.title(&report.keyword), &figure))?;
            written.push(path);
        }
        Ok(written)
    }

    fn ensure_dir(&self) -> Result<(), ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })
    }

    #[allow(clippy::unused_self)]
    fn write_file(&self, path: &Path, contents: &str) -> Result<(), ReportError> {
        fs::write(path, contents).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote report file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::fixtures;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 13, 9, 5, 7).unwrap()
    }

    #[test]
    fn writes_each_requested_format() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports"));
        let paths = writer
            .write_reports_at(
                &fixtures::report(),
                &[ReportFormat::Json, ReportFormat::Html, ReportFormat::Text],
                at(),
            )
            .unwrap();

        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "osint_report_rust_lang_20240513_090507.json",
                "osint_report_rust_lang_20240513_090507.html",
                "osint_report_rust_lang_20240513_090507.txt",
            ]
        );

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&paths[0]).unwrap()).unwrap();
        assert_eq!(json["metadata"]["total_posts"], 3);
        assert!(fs::read_to_string(&paths[2])
            .unwrap()
            .contains("OVERALL SENTIMENT DISTRIBUTION"));
    }

    #[test]
    fn writes_chart_pages() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let paths = writer.write_charts_at(&fixtures::report(), at()).unwrap();

        assert_eq!(paths.len(), ChartKind::ALL.len());
        assert!(paths[0].ends_with("osint_sentiment_pie_rust_lang_20240513_090507.html"));
        let page = fs::read_to_string(&paths[0]).unwrap();
        assert!(page.contains("Plotly.newPlot"));
    }

    #[test]
    fn empty_report_writes_no_charts() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("never-created"));
        let paths = writer.write_charts(&fixtures::empty_report()).unwrap();
        assert!(paths.is_empty());
        assert!(!dir.path().join("never-created").exists());
    }

    #[test]
    fn check_writable_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b");
        ReportWriter::new(&target).check_writable().unwrap();
        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn unusable_directory_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = ReportWriter::new(file.path().join("sub"))
            .check_writable()
            .unwrap_err();
        assert!(matches!(err, ReportError::CreateDir { .. }), "got: {err:?}");
    }
}
