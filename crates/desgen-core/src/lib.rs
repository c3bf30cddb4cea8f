pub mod backend;
pub mod conversation;
pub mod error;
pub mod identity;
pub mod run;
pub mod store;

// Re-export common error type
pub use error::{DesgenError, Result};
