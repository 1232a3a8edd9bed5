//! The reviewer trait and the default review prompt.

use crate::encode::EncodedScreenshot;
use crate::error::ReviewError;
use async_trait::async_trait;

/// The instruction sent when the caller doesn't supply one.
pub const DEFAULT_PROMPT: &str = "\
Analyze this game screenshot for:
1. UI/UX issues (alignment, visibility, colors)
2. Visual bugs or glitches
3. Layout problems
4. Suggested improvements
5. Any elements that look broken or incorrect

Be specific and actionable in your feedback.";

/// Trait for screenshot review backends.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the runner holds a `Box<dyn Reviewer>` so tests can substitute a stub).
#[async_trait]
pub trait Reviewer: Send + Sync {
    /// Backend name for logging (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Review one screenshot and return the model's feedback text.
    async fn review(
        &self,
        image: &EncodedScreenshot,
        prompt: &str,
    ) -> Result<String, ReviewError>;
}
