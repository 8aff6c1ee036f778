pub mod blocked_comments;
pub mod health;
pub mod hooks;
pub mod settings;
