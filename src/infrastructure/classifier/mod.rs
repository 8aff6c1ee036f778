pub mod ai_classifier;
pub mod traits;
