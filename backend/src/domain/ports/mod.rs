//! Domain ports.
//!
//! Driving ports (`LoginService`, `DirectoryQuery`) are called by inbound
//! adapters; driven ports (`SessionStore`, `FlagSource`) are implemented by
//! outbound adapters.

mod directory_query;
mod flag_source;
mod login_service;
mod session_store;

pub use directory_query::DirectoryQuery;
#[cfg(test)]
pub use flag_source::MockFlagSource;
pub use flag_source::{FlagDocument, FlagSource};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
pub use session_store::SessionStore;
