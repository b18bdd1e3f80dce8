//! Method-based request dispatch.
//!
//! A [`RecognizedMethods`] set lists the verbs the router will consider.
//! When a [`Resource`] is bound to a path, [`MethodDispatchTable::build`]
//! looks up one handler slot per recognized verb and keeps the ones that
//! can be called.

mod registry;
mod resource;
mod table;

pub use registry::{parse_method_list, standard_methods, RecognizedMethods, DEFAULT_CUSTOM_METHODS_ENV};
pub use resource::{responder_name, HandlerFn, HandlerFuture, HandlerSet, HandlerSlot, Resource, RESPONDER_PREFIX};
pub use table::MethodDispatchTable;
