//! Outbound adapters implementing driven ports.

pub mod flag;
pub mod session;

pub use flag::CapFlagSource;
pub use session::InMemorySessionStore;
