//! HTTP parser module.
//!
//! Turns raw HTTP/1.x request bytes into [`HttpRequest`] values for the
//! router. The request line accepts any method token so that custom verbs
//! reach the dispatch tables.

mod request;
mod method;
mod version;
mod error;
mod tests;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

pub use request::parse_request;
