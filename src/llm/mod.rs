pub mod completion_interface;
pub mod error;
pub mod factory;
pub mod openai_compatible_llm;

pub use completion_interface::*;
pub use error::LlmError;
pub use factory::create_completion_client;
