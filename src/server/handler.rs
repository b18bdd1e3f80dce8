//! Route entries.

use crate::routing::MethodDispatchTable;

/// Represents a route in the HTTP server.
#[derive(Debug)]
pub struct Route {
    /// The path to match, without a query string.
    pub path: String,
    /// Handlers for the methods the bound resource implements.
    pub table: MethodDispatchTable,
}
