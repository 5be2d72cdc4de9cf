//! 业务能力层

pub mod llm_service;
pub mod prompt_composer;

pub use llm_service::LlmService;
pub use prompt_composer::{compose, SYSTEM_PROMPT};
