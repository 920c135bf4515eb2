//! Completion-model provider adapters.

pub mod dto;
mod gemini;

pub use gemini::{GeminiCompletionModel, GeminiConfig};
