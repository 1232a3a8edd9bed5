//! Batch and watch orchestration.
//!
//! The runner owns the configuration and a boxed reviewer, so tests can
//! substitute a stub backend and drive both modes without a network.
//! Review failures are captured per screenshot and rendered as error text;
//! they never abort a batch or the watch loop.

use crate::config::Config;
use crate::discovery::ScreenshotDiscovery;
use crate::encode::EncodedScreenshot;
use crate::report::ReportWriter;
use crate::review::{AnthropicReviewer, Reviewer, DEFAULT_PROMPT};
use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of a batch run.
#[derive(Debug)]
pub enum BatchOutcome {
    /// The screenshot directory does not exist; nothing was written.
    MissingSourceDir(PathBuf),
    /// The directory exists but holds no matching screenshots.
    NoScreenshots(PathBuf),
    /// A report was written.
    Report {
        path: PathBuf,
        reviewed: usize,
        failed: usize,
    },
}

/// Drives screenshot discovery, review, and reporting.
pub struct Runner {
    config: Config,
    reviewer: Box<dyn Reviewer>,
    prompt: String,
    screen_filter: Option<String>,
}

impl Runner {
    /// Build a runner against the Anthropic backend.
    ///
    /// Resolves the credential up front: a missing API key fails here,
    /// before any filesystem scan or network call.
    pub fn from_config(config: Config) -> crate::error::Result<Self> {
        let api_key = config.resolved_api_key()?;
        let reviewer = Box::new(AnthropicReviewer::new(
            &api_key,
            &config.review.model,
            config.review.max_tokens,
        ));
        Ok(Self::with_reviewer(config, reviewer))
    }

    /// Build a runner with an explicit reviewer backend.
    pub fn with_reviewer(config: Config, reviewer: Box<dyn Reviewer>) -> Self {
        Self {
            config,
            reviewer,
            prompt: DEFAULT_PROMPT.to_string(),
            screen_filter: None,
        }
    }

    /// Override the instruction prompt sent with every screenshot.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Restrict review to file names containing the given pattern.
    pub fn with_screen_filter(mut self, filter: Option<String>) -> Self {
        self.screen_filter = filter;
        self
    }

    fn discovery(&self) -> ScreenshotDiscovery {
        ScreenshotDiscovery::new(self.config.source.clone())
            .with_name_filter(self.screen_filter.clone())
    }

    /// Review every screenshot in the source directory and write one
    /// Markdown report, sections in lexicographic filename order.
    pub async fn review_all(&self) -> crate::error::Result<BatchOutcome> {
        let source = self.config.screenshot_dir();
        if !source.exists() {
            tracing::warn!("Screenshot directory {} does not exist", source.display());
            return Ok(BatchOutcome::MissingSourceDir(source));
        }

        let screenshots = self.discovery().discover(&source);
        if screenshots.is_empty() {
            tracing::info!("No screenshots found in {}", source.display());
            return Ok(BatchOutcome::NoScreenshots(source));
        }
        tracing::info!("Found {} screenshots", screenshots.len());

        let mut report = ReportWriter::create(&self.config.report_dir())?;
        let mut failed = 0usize;

        for screenshot in &screenshots {
            tracing::info!("Reviewing: {}", screenshot.display());
            let (analysis, ok) = self.review_one(screenshot).await;
            if !ok {
                failed += 1;
            }
            report.add_section(screenshot, &analysis)?;
        }

        Ok(BatchOutcome::Report {
            path: report.path().to_path_buf(),
            reviewed: screenshots.len(),
            failed,
        })
    }

    /// Poll the source directory and review files as they appear, printing
    /// each analysis to stdout. No report file is written.
    ///
    /// Files already present when the loop starts are treated as seen and
    /// never reported. The seen-set is keyed by path, so a file deleted
    /// and recreated under the same name is not reviewed again.
    ///
    /// Runs until `cancel` completes; the binary passes ctrl-c, tests pass
    /// whatever future suits them.
    pub async fn watch<F>(&self, cancel: F) -> crate::error::Result<()>
    where
        F: Future<Output = ()>,
    {
        let source = self.config.screenshot_dir();
        std::fs::create_dir_all(&source)?;

        let discovery = self.discovery();
        let interval = Duration::from_millis(self.config.source.poll_interval_ms);
        let mut seen: HashSet<PathBuf> = discovery.discover(&source).into_iter().collect();

        tracing::info!(
            "Watching {} for new screenshots (poll every {}ms)",
            source.display(),
            self.config.source.poll_interval_ms
        );

        tokio::pin!(cancel);
        loop {
            for screenshot in discovery.discover(&source) {
                if seen.contains(&screenshot) {
                    continue;
                }
                let name = screenshot
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| screenshot.display().to_string());
                println!("New screenshot detected: {name}");
                let (analysis, _) = self.review_one(&screenshot).await;
                println!("\n{analysis}\n");
                seen.insert(screenshot);
            }

            tokio::select! {
                _ = &mut cancel => {
                    println!("Stopped watching");
                    return Ok(());
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }

    /// Encode and review one screenshot.
    ///
    /// Returns `(text, ok)`: on failure the text is a descriptive error
    /// string written to the report exactly like a real analysis.
    async fn review_one(&self, path: &Path) -> (String, bool) {
        let result = match EncodedScreenshot::from_path(path) {
            Ok(image) => self.reviewer.review(&image, &self.prompt).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(text) => (text, true),
            Err(e) => {
                tracing::warn!("Review failed for {}: {e}", path.display());
                (format!("ERROR analyzing screenshot: {e}"), false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Stub backend that echoes the file name it was asked about.
    ///
    /// The prompt is ignored; the "analysis" is the media type plus a
    /// per-call counter so tests can assert call ordering and counts.
    struct EchoReviewer {
        calls: Arc<Mutex<Vec<String>>>,
        fail_on: Option<String>,
    }

    impl EchoReviewer {
        fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    calls: calls.clone(),
                    fail_on: None,
                },
                calls,
            )
        }

        fn failing_on(name: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
            let (mut stub, calls) = Self::new();
            stub.fail_on = Some(name.to_string());
            (stub, calls)
        }
    }

    #[async_trait]
    impl Reviewer for EchoReviewer {
        fn name(&self) -> &str {
            "echo"
        }

        async fn review(
            &self,
            image: &EncodedScreenshot,
            _prompt: &str,
        ) -> Result<String, ReviewError> {
            let tag = format!("analysis:{}", image.media_type);
            self.calls.lock().unwrap().push(tag.clone());
            if let Some(fail) = &self.fail_on {
                if image.media_type.contains(fail) {
                    return Err(ReviewError::Api {
                        status: 500,
                        message: "stub failure".to_string(),
                    });
                }
            }
            Ok(tag)
        }
    }

    fn test_config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.source.screenshot_dir = dir.join("shots");
        config.report.report_dir = dir.join("reports");
        config.source.poll_interval_ms = 10;
        config
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[tokio::test]
    async fn test_batch_missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, calls) = EchoReviewer::new();
        let runner = Runner::with_reviewer(test_config(dir.path()), Box::new(stub));

        let outcome = runner.review_all().await.unwrap();
        assert!(matches!(outcome, BatchOutcome::MissingSourceDir(_)));
        assert!(calls.lock().unwrap().is_empty());
        assert!(!dir.path().join("reports").exists());
    }

    #[tokio::test]
    async fn test_batch_empty_dir_writes_no_report() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("shots")).unwrap();
        let (stub, _) = EchoReviewer::new();
        let runner = Runner::with_reviewer(test_config(dir.path()), Box::new(stub));

        let outcome = runner.review_all().await.unwrap();
        assert!(matches!(outcome, BatchOutcome::NoScreenshots(_)));
        assert!(!dir.path().join("reports").exists());
    }

    #[tokio::test]
    async fn test_batch_report_sections_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join("shots");
        touch(&shots, "menu.jpg");
        touch(&shots, "login.png");

        let (stub, _) = EchoReviewer::new();
        let runner = Runner::with_reviewer(test_config(dir.path()), Box::new(stub));

        let outcome = runner.review_all().await.unwrap();
        let BatchOutcome::Report {
            path,
            reviewed,
            failed,
        } = outcome
        else {
            panic!("expected a report");
        };
        assert_eq!(reviewed, 2);
        assert_eq!(failed, 0);

        let content = std::fs::read_to_string(&path).unwrap();
        let login = content.find("## login.png").expect("login section");
        let menu = content.find("## menu.jpg").expect("menu section");
        assert!(login < menu, "sections must be in lexicographic order");
        assert!(content.contains("analysis:image/png"));
        assert!(content.contains("analysis:image/jpeg"));
    }

    #[tokio::test]
    async fn test_batch_failure_becomes_error_section() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join("shots");
        touch(&shots, "a.png");
        touch(&shots, "b.gif");

        // Fail the gif; the png still gets a real section.
        let (stub, _) = EchoReviewer::failing_on("gif");
        let runner = Runner::with_reviewer(test_config(dir.path()), Box::new(stub));

        let BatchOutcome::Report {
            path,
            reviewed,
            failed,
        } = runner.review_all().await.unwrap()
        else {
            panic!("expected a report");
        };
        assert_eq!(reviewed, 2);
        assert_eq!(failed, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("## a.png"));
        assert!(content.contains("## b.gif"));
        assert!(content.contains("ERROR analyzing screenshot:"));
    }

    #[tokio::test]
    async fn test_batch_screen_filter() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join("shots");
        touch(&shots, "login_1.png");
        touch(&shots, "menu_1.png");

        let (stub, _) = EchoReviewer::new();
        let runner = Runner::with_reviewer(test_config(dir.path()), Box::new(stub))
            .with_screen_filter(Some("login".to_string()));

        let BatchOutcome::Report { path, reviewed, .. } = runner.review_all().await.unwrap()
        else {
            panic!("expected a report");
        };
        assert_eq!(reviewed, 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("## login_1.png"));
        assert!(!content.contains("## menu_1.png"));
    }

    #[tokio::test]
    async fn test_from_config_missing_key_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.review.api_key = "${DEFINITELY_NOT_SET_XYZ_123}".to_string();
        // Put a screenshot in place to prove no scan happens on failure.
        touch(&dir.path().join("shots"), "a.png");

        assert!(Runner::from_config(config).is_err());
        assert!(!dir.path().join("reports").exists());
    }

    #[tokio::test]
    async fn test_watch_reviews_only_new_files_once() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join("shots");
        touch(&shots, "old.png");

        let (stub, calls) = EchoReviewer::new();
        let runner = Runner::with_reviewer(test_config(dir.path()), Box::new(stub));

        let shots_for_task = shots.clone();
        let watch = runner.watch(async move {
            // Let a few poll intervals pass, then drop a new file in, then
            // give the loop time to pick it up (more than one interval, to
            // prove it is reported exactly once).
            tokio::time::sleep(Duration::from_millis(50)).await;
            std::fs::write(shots_for_task.join("new.jpg"), b"x").unwrap();
            tokio::time::sleep(Duration::from_millis(150)).await;
        });
        watch.await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            ["analysis:image/jpeg"],
            "pre-existing file must not be reviewed; new file exactly once"
        );
    }

    #[tokio::test]
    async fn test_watch_immediate_cancel() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, calls) = EchoReviewer::new();
        let runner = Runner::with_reviewer(test_config(dir.path()), Box::new(stub));

        runner.watch(std::future::ready(())).await.unwrap();
        assert!(calls.lock().unwrap().is_empty());
        // Watch mode creates the source directory if missing.
        assert!(dir.path().join("shots").exists());
    }
}
