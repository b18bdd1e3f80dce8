//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};

use crate::routing::{RecognizedMethods, DEFAULT_CUSTOM_METHODS_ENV};

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
    /// Methods considered when building dispatch tables. The server keeps
    /// its own copy from construction on.
    pub recognized_methods: RecognizedMethods,
}

impl ServerConfig {
    /// Default configuration with custom methods taken from
    /// [`DEFAULT_CUSTOM_METHODS_ENV`].
    pub fn from_env() -> Self {
        Self {
            recognized_methods: RecognizedMethods::bootstrap(std::iter::empty::<&str>(), DEFAULT_CUSTOM_METHODS_ENV),
            ..Self::default()
        }
    }

    /// Add compiled-in custom methods.
    pub fn with_custom_methods<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.recognized_methods.extend(names);
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            max_connections: 1024,
            read_buffer_size: 8192,
            recognized_methods: RecognizedMethods::initialize(),
        }
    }
}
