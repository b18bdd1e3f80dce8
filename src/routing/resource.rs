//! Resources and their handler slots.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::server::{Error, HttpResponse};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Type alias for a handler function that takes an HttpRequest and returns a HandlerFuture.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// Prefix shared by every handler slot identifier.
pub const RESPONDER_PREFIX: &str = "on_";

/// The slot identifier a handler for `method` must be bound to.
///
/// `GET` maps to `on_get`; with suffix `collection` it maps to
/// `on_get_collection`.
pub fn responder_name(method: &str, suffix: Option<&str>) -> String {
    let method = method.to_lowercase();
    match suffix {
        Some(suffix) => format!("{RESPONDER_PREFIX}{method}_{suffix}"),
        None => format!("{RESPONDER_PREFIX}{method}"),
    }
}

/// Result of looking up a handler slot on a resource.
#[derive(Clone)]
pub enum HandlerSlot {
    /// Nothing is bound to the identifier.
    Missing,
    /// Something is bound, but it cannot be called.
    NotInvocable,
    /// A handler is bound.
    Invocable(HandlerFn),
}

impl HandlerSlot {
    pub fn is_invocable(&self) -> bool {
        matches!(self, HandlerSlot::Invocable(_))
    }
}

impl std::fmt::Debug for HandlerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerSlot::Missing => f.write_str("Missing"),
            HandlerSlot::NotInvocable => f.write_str("NotInvocable"),
            HandlerSlot::Invocable(_) => f.write_str("Invocable(..)"),
        }
    }
}

/// Something that exposes handlers through named slots.
///
/// The dispatch table builder only ever asks for identifiers produced by
/// [`responder_name`], one per recognized method.
pub trait Resource: Send + Sync {
    fn slot(&self, identifier: &str) -> HandlerSlot;
}

impl<R: Resource + ?Sized> Resource for Arc<R> {
    fn slot(&self, identifier: &str) -> HandlerSlot {
        (**self).slot(identifier)
    }
}

enum Binding {
    Handler(HandlerFn),
    Value(serde_json::Value),
}

/// A resource assembled from individual handlers.
///
/// ```
/// use microroute_rs::routing::{HandlerSet, Resource};
/// use microroute_rs::{HttpResponse, StatusCode};
///
/// let things = HandlerSet::new()
///     .on("FOO", |_req| async { Ok(HttpResponse::new(StatusCode::NoContent)) })
///     .placeholder("PATCH", serde_json::json!({}));
///
/// assert!(things.slot("on_foo").is_invocable());
/// assert!(!things.slot("on_patch").is_invocable());
/// ```
#[derive(Default)]
pub struct HandlerSet {
    slots: HashMap<String, Binding>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler for `method`.
    pub fn on<F, Fut>(self, method: &str, handler: F) -> Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.bind_handler(responder_name(method, None), handler)
    }

    /// Bind a handler for `method` under a suffixed identifier, for resources
    /// that serve several routes.
    pub fn on_suffixed<F, Fut>(self, method: &str, suffix: &str, handler: F) -> Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.bind_handler(responder_name(method, Some(suffix)), handler)
    }

    /// Bind a plain value at the slot for `method`. The method is then
    /// treated as not implemented, even if it is a standard one.
    pub fn placeholder(mut self, method: &str, value: serde_json::Value) -> Self {
        self.slots.insert(responder_name(method, None), Binding::Value(value));
        self
    }

    /// The value bound by [`HandlerSet::placeholder`], if any.
    pub fn placeholder_value(&self, method: &str) -> Option<&serde_json::Value> {
        match self.slots.get(&responder_name(method, None)) {
            Some(Binding::Value(value)) => Some(value),
            _ => None,
        }
    }

    fn bind_handler<F, Fut>(mut self, identifier: String, handler: F) -> Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        let handler: HandlerFn = Arc::new(move |req: HttpRequest| -> HandlerFuture {
            Box::pin(handler(req))
        });
        self.slots.insert(identifier, Binding::Handler(handler));
        self
    }
}

impl Resource for HandlerSet {
    fn slot(&self, identifier: &str) -> HandlerSlot {
        match self.slots.get(identifier) {
            None => HandlerSlot::Missing,
            Some(Binding::Value(_)) => HandlerSlot::NotInvocable,
            Some(Binding::Handler(handler)) => HandlerSlot::Invocable(handler.clone()),
        }
    }
}
