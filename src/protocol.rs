//! Wire types for the completion server.
//!
//! The server speaks the llama.cpp style `/completion` API: a JSON prompt in,
//! a JSON object with the generated `content` out.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Request body for `POST /completion`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    /// Full prompt text, ending where the reply should begin.
    pub prompt: String,
    /// Sequences that end generation.
    pub stop: Vec<String>,
    /// Maximum number of tokens to generate.
    pub n_predict: u32,
    /// Let the server reuse the prompt's cached evaluation.
    pub cache_prompt: bool,
}

impl CompletionRequest {
    /// Build the request for one user turn.
    ///
    /// Generation stops as soon as the model starts writing the user's next line.
    pub fn for_turn(config: &Config, input: &str) -> Self {
        Self {
            prompt: format!(
                "{}\n{}: {}\n{}:",
                config.preamble, config.user_name, input, config.interlocutor_name
            ),
            stop: vec![format!("\n{}:", config.user_name)],
            n_predict: config.limit,
            cache_prompt: true,
        }
    }
}

/// Response body from `POST /completion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text, if any.
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// The reply with surrounding spaces, newlines and tabs removed.
    pub fn reply(&self) -> Option<&str> {
        self.content
            .as_deref()
            .map(|content| content.trim_matches(|c| matches!(c, ' ' | '\n' | '\t')))
    }
}
