pub mod sqlx_blocked_comment_repository;
pub mod sqlx_settings_repository;
pub mod sqlx_video_repository;
