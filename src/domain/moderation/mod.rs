pub mod blocked_comment;
pub mod repository;
pub mod settings;
pub mod submission;
pub mod verdict;
pub mod video;
