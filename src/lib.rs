//! Method-based HTTP request dispatch with an extensible verb set.
//!
//! Handlers live on resources under slot names derived from the method
//! (`on_get`, `on_foo`, ...). When a resource is bound to a path, the router
//! builds a dispatch table from the methods it recognizes: the standard
//! HTTP and WebDAV verbs plus any custom verbs the application adds at
//! startup or an operator lists in an environment variable.
//!
//! # Features
//!
//! - Recognized method set seeded with the standard verbs, extendable from code
//!   or from `MICROROUTE_CUSTOM_HTTP_METHODS` (e.g. `"FOO, BAR"`)
//! - Per-route dispatch tables built once, at registration
//! - Slots bound to a non-callable value count as "not implemented"
//! - `405 Method Not Allowed` with an `Allow` header for unhandled methods
//! - An async tokio server and an in-memory [`testing::TestClient`]
//!
//! # Examples
//!
//! ```
//! use microroute_rs::routing::{HandlerSet, MethodDispatchTable, RecognizedMethods};
//! use microroute_rs::{HttpResponse, StatusCode};
//!
//! let mut methods = RecognizedMethods::initialize();
//! methods.extend(["foo", "BAR"]);
//!
//! let things = HandlerSet::new()
//!     .on("FOO", |_req| async { Ok(HttpResponse::new(StatusCode::NoContent)) });
//!
//! let table = MethodDispatchTable::build(&things, &methods);
//! assert!(table.contains("FOO"));
//! assert!(!table.contains("BAR"));
//! ```
//!
//! ## Serving custom methods
//!
//! ```no_run
//! use microroute_rs::routing::HandlerSet;
//! use microroute_rs::{HttpResponse, HttpServer, ServerConfig, StatusCode};
//!
//! # async fn run() -> Result<(), microroute_rs::ServerError> {
//! let config = ServerConfig::from_env().with_custom_methods(["PURGE"]);
//! let server = HttpServer::new(config);
//!
//! let cache = HandlerSet::new()
//!     .on("PURGE", |_req| async { Ok(HttpResponse::new(StatusCode::Accepted)) });
//! server.add_resource("/cache", &cache).await;
//!
//! server.start().await
//! # }
//! ```
//!
//! See `demos/custom_methods.rs` for a complete server.

pub mod parser;

pub mod routing;

pub mod server;

pub mod testing;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use routing::{HandlerSet, MethodDispatchTable, RecognizedMethods, Resource};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
