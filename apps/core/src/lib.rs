//! Prospection Guard
//!
//! Classifies LinkedIn direct messages (French and English) as prospection
//! or legitimate conversation, and drives the review loop around it: scan
//! rooms, queue detections, then ignore, send, or rewrite the suggested reply.

pub mod actions;
pub mod beeper;
pub mod brain;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod scanner;
pub mod source;
pub mod state;
pub mod templates;

pub use brain::{ClassificationResult, ContextHint, Language, ProspectionClassifier};
pub use config::{AppConfig, EngineConfig};
pub use error::AppError;
pub use models::Message;

#[cfg(test)]
mod tests;
