pub mod classify;
pub mod llm;

pub use classify::ClassificationService;
pub use llm::LlmClient;
