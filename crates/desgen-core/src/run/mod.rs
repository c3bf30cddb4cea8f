//! Run domain: one prompt-to-output session owning an ordered conversation.

pub mod model;

pub use model::{NewRun, Run};
