//! Dynamic event dispatch
//!
//! A [`Binding`] listens for one named event. When the event arrives with an
//! optional parameter, the binding runs its conditional group against the
//! parameter; if the group passes, the parameter is threaded through the
//! binding's transformation chain and the resulting value is handed to the
//! binding's effect. A failing group ends the binding's work silently.

use crate::effect::{DispatchResult, EffectHandler, EffectInvocation};
use crate::{
    AssetId, ConditionalGroup, DispatchConfig, Effect, EventId, TransformChain, Value,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

/// Wires an event through a group and a chain into an effect
#[derive(Debug, Clone)]
pub struct Binding {
    /// Unique ID for this binding
    pub id: AssetId,
    /// Which event this binding listens for
    pub event: EventId,
    /// Must pass for the effect to fire; absent means always
    pub condition: Option<Arc<ConditionalGroup>>,
    /// Applied to the parameter before it reaches the effect
    pub transform: Option<Arc<TransformChain>>,
    pub effect: Effect,
    /// Priority (higher = runs first)
    pub priority: i32,
}

impl Binding {
    pub fn new(id: impl Into<AssetId>, event: impl Into<EventId>, effect: Effect) -> Self {
        Self {
            id: id.into(),
            event: event.into(),
            condition: None,
            transform: None,
            effect,
            priority: 0,
        }
    }

    pub fn with_condition(mut self, condition: Arc<ConditionalGroup>) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_transform(mut self, transform: Arc<TransformChain>) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the condition passes for this parameter
    pub fn accepts(&self, param: &Value) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |group| group.evaluate(param))
    }

    /// Run the binding; `None` when the condition fails
    pub fn fire(&self, param: &Value) -> Option<EffectInvocation> {
        if !self.accepts(param) {
            return None;
        }
        let value = match &self.transform {
            Some(chain) => chain.apply(param.clone()),
            None => param.clone(),
        };
        Some(EffectInvocation {
            binding: self.id.clone(),
            effect: self.effect.clone(),
            value,
        })
    }
}

/// Routes events to bindings
#[derive(Debug, Default)]
pub struct Dispatcher {
    /// Sorted by descending priority; ties keep registration order
    bindings: Vec<Binding>,
    /// Events waiting for the next flush
    queue: VecDeque<(EventId, Option<Value>)>,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Register a binding
    pub fn bind(&mut self, binding: Binding) {
        self.bindings.push(binding);
        self.bindings.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Bindings listening for an event, in firing order
    pub fn bindings_for<'a>(&'a self, event: &'a EventId) -> impl Iterator<Item = &'a Binding> {
        self.bindings.iter().filter(move |b| &b.event == event)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Evaluate every binding for an event
    pub fn dispatch(&self, event: &EventId, param: Option<Value>) -> DispatchResult {
        let param = param.unwrap_or_default();
        let mut result = DispatchResult::new();

        for binding in self.bindings_for(event) {
            match binding.fire(&param) {
                Some(invocation) => {
                    debug!(
                        event = %event,
                        binding = %binding.id,
                        effect = binding.effect.kind(),
                        value = %invocation.value,
                        "binding fired"
                    );
                    result.invocations.push(invocation);
                    if self.config.first_match_only {
                        break;
                    }
                }
                None => {
                    if self.config.log_rejections {
                        trace!(
                            event = %event,
                            binding = %binding.id,
                            param = param.type_name(),
                            "binding conditions failed"
                        );
                    }
                    result.rejected.push(binding.id.clone());
                }
            }
        }

        result
    }

    /// Dispatch and hand every fired effect to `handler`
    pub fn dispatch_to(
        &self,
        event: &EventId,
        param: Option<Value>,
        handler: &mut dyn EffectHandler,
    ) -> DispatchResult {
        let result = self.dispatch(event, param);
        result.apply(handler);
        result
    }

    /// Queue an event for the next [`flush`](Self::flush)
    pub fn send(&mut self, event: impl Into<EventId>, param: Option<Value>) {
        self.queue.push_back((event.into(), param));
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch all queued events in arrival order
    pub fn flush(&mut self, handler: &mut dyn EffectHandler) -> DispatchResult {
        let mut result = DispatchResult::new();
        while let Some((event, param)) = self.queue.pop_front() {
            result.merge(self.dispatch_to(&event, param, handler));
        }
        result
    }
}
