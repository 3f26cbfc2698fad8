use crate::domain::model::{OperationId, Verb};
use crate::domain::ports::{HandlerRegistry, PatchHandler};
use std::collections::HashMap;
use std::sync::Arc;

/// Typed handler registry: a map from (operation, verb) to the handler
/// executing that operation. Replaces stringly-keyed factory lookup
/// while keeping the same effective behavior.
#[derive(Default)]
pub struct MapHandlerRegistry {
    handlers: HashMap<(OperationId, Verb), Arc<dyn PatchHandler>>,
}

impl MapHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        operation: OperationId,
        verb: Verb,
        handler: Arc<dyn PatchHandler>,
    ) -> &mut Self {
        self.handlers.insert((operation, verb), handler);
        self
    }
}

impl HandlerRegistry for MapHandlerRegistry {
    fn lookup(&self, operation: &OperationId, verb: Verb) -> Option<Arc<dyn PatchHandler>> {
        self.handlers.get(&(operation.clone(), verb)).cloned()
    }
}
