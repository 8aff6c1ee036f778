pub mod comment_moderator;
pub mod text_extractor;
