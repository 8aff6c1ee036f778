pub mod moderation;
pub mod shared;
