//! Generation provider implementations

mod gemini;
pub mod mock;

pub use gemini::{DEFAULT_MODEL, GEMINI_API_URL, GeminiProvider, response_schema};
pub use mock::MockProvider;
