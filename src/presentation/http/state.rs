use crate::{
    application::{moderate_comment::use_case::ModerationEngine, review_comments::use_case::ReviewService},
    config::Config,
    domain::moderation::{
        repository::{BlockedCommentRepository, SettingsRepository, VideoRepository},
        settings::SettingsProvider,
    },
    infrastructure::classifier::traits::CommentClassifier,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub blocked_comments: Arc<dyn BlockedCommentRepository>,
    pub settings: SettingsProvider,
    pub moderation: ModerationEngine,
    pub reviews: ReviewService,
}

impl AppState {
    pub fn new(
        config: Config,
        blocked_comments: Arc<dyn BlockedCommentRepository>,
        videos: Arc<dyn VideoRepository>,
        settings: Arc<dyn SettingsRepository>,
        classifier: Arc<dyn CommentClassifier>,
    ) -> Self {
        let settings = SettingsProvider::new(settings);
        Self {
            config,
            moderation: ModerationEngine::new(
                classifier,
                blocked_comments.clone(),
                settings.clone(),
            ),
            reviews: ReviewService::new(blocked_comments.clone(), videos),
            blocked_comments,
            settings,
        }
    }
}
