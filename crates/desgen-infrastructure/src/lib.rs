//! Infrastructure adapters for the Desgen session core.
//!
//! Concrete implementations of the `desgen-core` capability traits: an
//! in-memory document store with live-query support and the HTTP client
//! for the generation backend.

pub mod http_backend;
pub mod memory_store;

pub use http_backend::HttpDesignBackend;
pub use memory_store::MemoryStore;
