//! Caller address used in request and security logs.

use actix_web::HttpRequest;

/// Address of the directly connected peer, or `"unknown"` when the transport
/// does not expose one (unit tests, Unix sockets).
///
/// Forwarding headers are ignored: they are client-controlled and this server
/// is not deployed behind a trusted proxy.
#[must_use]
pub fn caller_address(req: &HttpRequest) -> String {
    req.peer_addr()
        .map_or_else(|| "unknown".to_owned(), |addr| addr.ip().to_string())
}
