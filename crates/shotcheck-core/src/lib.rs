//! shotcheck core - screenshot review library.
//!
//! shotcheck scans a folder of debug screenshots, sends each one to a
//! vision-capable model for review, and collects the feedback into a
//! timestamped Markdown report. A watch mode polls the folder and reviews
//! new screenshots as they appear.
//!
//! # Architecture
//!
//! The flow is deliberately sequential, one screenshot at a time:
//!
//! ```text
//! Discover → Encode (base64) → Review (Messages API) → Report / stdout
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use shotcheck_core::{Config, Runner};
//!
//! #[tokio::main]
//! async fn main() -> shotcheck_core::Result<()> {
//!     let config = Config::load()?;
//!     let runner = Runner::from_config(config)?;
//!     let outcome = runner.review_all().await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod discovery;
pub mod encode;
pub mod error;
pub mod report;
pub mod review;
pub mod runner;

// Re-exports for convenient access
pub use config::Config;
pub use discovery::ScreenshotDiscovery;
pub use encode::{media_type_for, EncodedScreenshot};
pub use error::{ConfigError, ReviewError, Result, ShotcheckError};
pub use report::ReportWriter;
pub use review::{AnthropicReviewer, Reviewer, DEFAULT_PROMPT};
pub use runner::{BatchOutcome, Runner};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
