//! Identity domain: the authenticated principal and its session state.

pub mod gateway;
pub mod model;
pub mod session;

pub use gateway::IdentityGateway;
pub use model::Identity;
pub use session::IdentitySession;
