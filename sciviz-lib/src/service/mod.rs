//! Client for the generative language service.

mod config;
mod error;
mod gemini;
mod prompt;

pub use config::GeminiConfig;
pub use error::ServiceError;
pub use gemini::GeminiClient;
