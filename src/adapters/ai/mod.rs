//! Completion service adapters.

mod mock;
mod openai;

pub use mock::MockCompletionService;
pub use openai::{OpenAiCompletionService, OpenAiConfig};
