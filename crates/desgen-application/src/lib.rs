//! Application layer of the Desgen session core.
//!
//! Composes the domain capabilities from `desgen-core` into the run and
//! conversation synchronization logic: the cached run list, the active run
//! selection, the live conversation view, and the sequenced generation
//! flow.

pub mod controller;
pub mod conversation;
pub mod orchestrator;
pub mod registry;
pub mod session;

pub use controller::SessionController;
pub use conversation::ConversationStream;
pub use orchestrator::GenerationOrchestrator;
pub use registry::{RECENT_RUN_LIMIT, RunRegistry};
pub use session::RunSession;
