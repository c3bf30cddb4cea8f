//! Conversation domain: entries and generation results.

pub mod entry;
pub mod result;

pub use entry::{Entry, EntryRole, NewEntry};
pub use result::GenerationResult;
