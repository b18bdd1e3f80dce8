//! Per-route method dispatch tables.

use std::collections::BTreeMap;

use log::trace;

use crate::routing::registry::RecognizedMethods;
use crate::routing::resource::{responder_name, HandlerFn, HandlerSlot, Resource};

/// Maps method names to the handlers a resource implements for them.
///
/// Only methods that are both recognized and backed by an invocable slot
/// appear. The table does not change after it is built.
#[derive(Clone, Default)]
pub struct MethodDispatchTable {
    handlers: BTreeMap<String, HandlerFn>,
}

impl MethodDispatchTable {
    /// Build the table for `resource` using the default slot names.
    pub fn build<R: Resource + ?Sized>(resource: &R, methods: &RecognizedMethods) -> Self {
        Self::build_with_suffix(resource, methods, None)
    }

    /// Build the table for `resource`, looking handlers up under
    /// `on_<method>_<suffix>` when a suffix is given.
    ///
    /// Missing and non-invocable slots are skipped. This never fails; a
    /// resource with no handlers yields an empty table.
    pub fn build_with_suffix<R: Resource + ?Sized>(
        resource: &R,
        methods: &RecognizedMethods,
        suffix: Option<&str>,
    ) -> Self {
        let mut handlers = BTreeMap::new();

        for method in methods.iter() {
            let identifier = responder_name(method, suffix);
            match resource.slot(&identifier) {
                HandlerSlot::Invocable(handler) => {
                    handlers.insert(method.to_string(), handler);
                }
                HandlerSlot::NotInvocable => {
                    trace!("Slot {identifier} is bound but not invocable, {method} not implemented");
                }
                HandlerSlot::Missing => {}
            }
        }

        Self { handlers }
    }

    pub fn get(&self, method: &str) -> Option<&HandlerFn> {
        self.handlers.get(method)
    }

    pub fn contains(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Implemented method names in ascending order.
    pub fn allowed_methods(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for MethodDispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
