//! Markdown report writing for batch runs.
//!
//! One report file per run, named with the local start time. Sections are
//! flushed as they are written, so an interrupted run leaves a partial but
//! readable report behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Incremental writer for a single review report.
pub struct ReportWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ReportWriter {
    /// Create the report directory (if needed) and open a new report file.
    ///
    /// The file name embeds the local timestamp to second precision
    /// (`review_YYYY-MM-DD_HH-MM-SS.md`). Two runs starting within the same
    /// second share a name and the later one wins; fine for a debug tool.
    pub fn create(report_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(report_dir)?;

        let now = chrono::Local::now();
        let path = report_dir.join(format!("review_{}.md", now.format("%Y-%m-%d_%H-%M-%S")));
        let mut writer = BufWriter::new(File::create(&path)?);

        writeln!(writer, "# Debug Screenshot Review")?;
        writeln!(writer, "Generated: {}", now.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(Self { path, writer })
    }

    /// Append one per-screenshot section and flush it to disk.
    ///
    /// The image embed uses the screenshot's absolute path so the report
    /// renders when opened on the machine that produced it.
    pub fn add_section(&mut self, screenshot: &Path, analysis: &str) -> std::io::Result<()> {
        let name = screenshot
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| screenshot.display().to_string());
        let absolute = std::fs::canonicalize(screenshot)
            .unwrap_or_else(|_| screenshot.to_path_buf());

        writeln!(self.writer, "## {name}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "![Screenshot]({})", absolute.display())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "### Claude's Analysis:")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{analysis}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer)?;
        self.writer.flush()
    }

    /// Path of the report file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
