pub mod classifier;
pub mod database;
pub mod repositories;
pub mod security;
