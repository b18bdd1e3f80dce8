//! HTTP server for microroute-rs.
//!
//! The server is the router collaborator of the dispatch core: it stores one
//! [`MethodDispatchTable`](crate::routing::MethodDispatchTable) per path and
//! answers `405 Method Not Allowed` when a request's method has no entry.

mod response;
mod config;
mod error;
mod handler;
mod http_server;

// Re-export public items
pub use response::{ErrorBody, HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use handler::Route;
pub use http_server::HttpServer;
