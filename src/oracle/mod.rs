pub mod client;
pub mod key;
pub mod prompt;

pub use client::{extract_text, OracleClient};
pub use key::ApiKey;
pub use prompt::InsightRequest;
