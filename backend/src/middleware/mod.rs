//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and session resolution.

pub mod session;
pub mod trace;

pub use session::SessionLayer;
pub use trace::Trace;
