//! Remote screenshot review.
//!
//! Defines the `Reviewer` trait the runner drives, plus the Anthropic
//! Messages API implementation. One request per screenshot, no retries.

pub(crate) mod anthropic;
pub(crate) mod reviewer;

pub use anthropic::AnthropicReviewer;
pub use reviewer::{Reviewer, DEFAULT_PROMPT};
