//! The set of HTTP method names the router considers when building
//! dispatch tables.

use std::collections::BTreeSet;
use std::env;

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`RecognizedMethods::bootstrap`] when no
/// other name is configured.
pub const DEFAULT_CUSTOM_METHODS_ENV: &str = "MICROROUTE_CUSTOM_HTTP_METHODS";

const HTTP_METHODS: &[&str] = &[
    "CONNECT", "DELETE", "GET", "HEAD", "OPTIONS", "PATCH", "POST", "PUT", "TRACE",
];

const WEBDAV_METHODS: &[&str] = &[
    "CHECKIN",
    "CHECKOUT",
    "COPY",
    "LOCK",
    "MKCOL",
    "MOVE",
    "PROPFIND",
    "PROPPATCH",
    "REPORT",
    "UNCHECKIN",
    "UNLOCK",
    "UPDATE",
    "VERSION-CONTROL",
];

/// The fixed standard verbs: the HTTP methods followed by the WebDAV methods.
pub fn standard_methods() -> impl Iterator<Item = &'static str> {
    HTTP_METHODS.iter().chain(WEBDAV_METHODS).copied()
}

/// Normalize one method name: surrounding whitespace stripped, uppercased.
///
/// Returns `None` for names that are empty after trimming.
fn normalize(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_uppercase())
    }
}

/// Parse a comma-separated list of method names.
///
/// Tokens are trimmed and uppercased; empty tokens (from a trailing comma or
/// `a,,b`) are dropped. No other validation happens here.
///
/// ```
/// use microroute_rs::routing::parse_method_list;
///
/// assert_eq!(parse_method_list(" foo , BAR "), vec!["FOO", "BAR"]);
/// assert_eq!(parse_method_list("FOO,"), vec!["FOO"]);
/// ```
pub fn parse_method_list(input: &str) -> Vec<String> {
    input.split(',').filter_map(normalize).collect()
}

/// The recognized method set.
///
/// Every member is uppercase, trimmed and non-empty. This is configuration:
/// build it at startup (see [`RecognizedMethods::bootstrap`]) and hand it to
/// the server, which keeps its own copy. Mutating a set after a server has
/// been created does not affect that server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecognizedMethods {
    names: BTreeSet<String>,
}

impl RecognizedMethods {
    /// A set holding exactly the standard methods.
    pub fn initialize() -> Self {
        let mut methods = Self { names: BTreeSet::new() };
        methods.extend(standard_methods());
        methods
    }

    /// Standard methods, then the application's compiled-in list, then the
    /// comma-separated list in `env_var` if it is set.
    pub fn bootstrap<I, S>(custom: I, env_var: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut methods = Self::initialize();
        methods.extend(custom);
        methods.load_from_environment(env_var);
        info!("Recognizing {count} HTTP methods", count = methods.len());
        methods
    }

    /// Add names to the set. Duplicates and blank names are absorbed.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            if let Some(name) = normalize(name.as_ref()) {
                if self.names.insert(name.clone()) {
                    debug!("Recognized custom HTTP method {name}");
                }
            }
        }
    }

    /// Extend the set from a comma-separated list in the environment.
    ///
    /// An unset variable (or one that is not valid unicode) leaves the set
    /// unchanged.
    pub fn load_from_environment(&mut self, var_name: &str) {
        match env::var(var_name) {
            Ok(value) => {
                debug!("Loading custom HTTP methods from {var_name}={value:?}");
                self.extend(parse_method_list(&value));
            }
            Err(_) => debug!("{var_name} is not set, no custom HTTP methods loaded"),
        }
    }

    /// Replace the whole set with `to`, normalized.
    pub fn reset<I, S>(&mut self, to: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names.clear();
        self.extend(to);
    }

    /// Whether `name` is recognized. The lookup is exact: callers pass
    /// uppercase names.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Recognized names in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for RecognizedMethods {
    fn default() -> Self {
        Self::initialize()
    }
}

impl From<Vec<String>> for RecognizedMethods {
    fn from(names: Vec<String>) -> Self {
        let mut methods = Self { names: BTreeSet::new() };
        methods.extend(names);
        methods
    }
}

impl From<RecognizedMethods> for Vec<String> {
    fn from(methods: RecognizedMethods) -> Self {
        methods.names.into_iter().collect()
    }
}
