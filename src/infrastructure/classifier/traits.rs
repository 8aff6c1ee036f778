use crate::domain::moderation::verdict::Verdict;
use async_trait::async_trait;

#[async_trait]
pub trait CommentClassifier: Send + Sync {
    /// Score comment text. Infallible by contract: failures yield `Verdict::fail_open()`.
    async fn classify(&self, text: &str) -> Verdict;
}
