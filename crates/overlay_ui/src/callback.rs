//! Behavior registry and callback table.
//!
//! Native behaviors are registered by name before a blueprint is compiled.
//! Compilation binds each `onState`/`onFrame` hook to a slot in the callback
//! array; hooks naming the same behavior share one slot. Slot 0 is a
//! permanently empty sentinel and is never handed out.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use overlay_core::{fnv1a_32, FixedArray};
use tracing::debug;

use crate::error::{UiError, UiResult};
use crate::node::{Node, NodeState};

/// Maximum number of callback slots, sentinel included.
pub const MAX_CALLBACKS: usize = 256;

/// Fixed-capacity callback storage.
pub type CallbackArray = FixedArray<Callback, MAX_CALLBACKS>;

/// What a behavior is being invoked for.
#[derive(Debug)]
pub enum HookEvent<'a> {
    /// Pointer input changed the node's state. The value is the proposed
    /// new state; whatever the hook leaves in it is committed.
    State(&'a mut NodeState),
    /// Per-frame update.
    Frame {
        /// Time since the previous frame.
        delta: Duration,
    },
}

/// A native behavior. The boolean result is the hook's verdict: for frame
/// hooks `true` requests a repaint, for state hooks it is advisory.
pub type Behavior = fn(&mut Node, HookEvent<'_>) -> bool;

/// Index of a bound behavior in the callback array. Never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackSlot(pub u8);

impl CallbackSlot {
    /// Returns the array index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One entry of the callback array.
#[derive(Clone, Copy, Default)]
pub struct Callback {
    /// Hash of the behavior name this slot was bound from.
    pub key: u32,
    /// The behavior; `None` only for the sentinel.
    pub behavior: Option<Behavior>,
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("key", &format_args!("{:#010x}", self.key))
            .field("bound", &self.behavior.is_some())
            .finish()
    }
}

/// Name-to-behavior table, filled by the application before compiling.
#[derive(Default, Clone)]
pub struct BehaviorRegistry {
    behaviors: HashMap<u32, Behavior>,
}

impl BehaviorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a behavior, replacing any previous one under the same name.
    pub fn register(&mut self, name: &str, behavior: Behavior) -> &mut Self {
        self.behaviors.insert(fnv1a_32(name), behavior);
        self
    }

    /// Looks up a behavior by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Behavior> {
        self.behaviors.get(&fnv1a_32(name)).copied()
    }

    /// Number of registered behaviors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("behaviors", &self.behaviors.len())
            .finish()
    }
}

/// Empties `callbacks` and installs the sentinel in slot 0.
pub fn reset_callbacks(callbacks: &mut CallbackArray) {
    callbacks.clear();
    // A cleared array always has room for the sentinel.
    let _ = callbacks.add(Callback::default());
}

/// Binds a hook name to a callback slot.
///
/// Returns `None` if the name is not registered. A name bound before
/// returns the slot it was first given.
///
/// # Errors
///
/// Returns [`UiError::CallbackCapacity`] if a new slot is needed and none is free.
pub fn bind(
    registry: &BehaviorRegistry,
    callbacks: &mut CallbackArray,
    name: &str,
) -> UiResult<Option<CallbackSlot>> {
    let Some(behavior) = registry.get(name) else {
        debug!(hook = name, "behavior not registered, hook left unbound");
        return Ok(None);
    };

    let key = fnv1a_32(name);
    let existing = callbacks
        .iter()
        .skip(1)
        .position(|callback| callback.key == key)
        .map(|position| position + 1);

    let index = match existing {
        Some(index) => index,
        None => {
            let (index, _) = callbacks
                .add(Callback {
                    key,
                    behavior: Some(behavior),
                })
                .map_err(|e| UiError::CallbackCapacity(e.capacity))?;
            index
        }
    };

    Ok(Some(CallbackSlot(index as u8)))
}

/// Invokes the behavior in `slot` on `node`. Unbound slots return `false`.
pub fn invoke(
    callbacks: &CallbackArray,
    slot: CallbackSlot,
    node: &mut Node,
    event: HookEvent<'_>,
) -> bool {
    callbacks
        .get(slot.index())
        .and_then(|callback| callback.behavior)
        .is_some_and(|behavior| behavior(node, event))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hover_only(_: &mut Node, event: HookEvent<'_>) -> bool {
        if let HookEvent::State(state) = event {
            state.left_clicked = false;
        }
        true
    }

    fn grow(node: &mut Node, event: HookEvent<'_>) -> bool {
        if let HookEvent::Frame { delta } = event {
            node.area.x1 += delta.as_secs_f32();
            return true;
        }
        false
    }

    fn fresh() -> CallbackArray {
        let mut callbacks = CallbackArray::new();
        reset_callbacks(&mut callbacks);
        callbacks
    }

    #[test]
    fn test_same_name_shares_slot() {
        let mut registry = BehaviorRegistry::new();
        registry.register("HoverOnly", hover_only).register("Grow", grow);
        let mut callbacks = fresh();

        let first = bind(&registry, &mut callbacks, "HoverOnly").unwrap();
        let second = bind(&registry, &mut callbacks, "Grow").unwrap();
        let again = bind(&registry, &mut callbacks, "HoverOnly").unwrap();

        assert_eq!(first, Some(CallbackSlot(1)));
        assert_eq!(second, Some(CallbackSlot(2)));
        assert_eq!(again, first);
        assert_eq!(callbacks.len(), 3);
    }

    #[test]
    fn test_unknown_name_is_unbound() {
        let registry = BehaviorRegistry::new();
        let mut callbacks = fresh();

        assert_eq!(bind(&registry, &mut callbacks, "Nope").unwrap(), None);
        assert_eq!(callbacks.len(), 1);
    }

    #[test]
    fn test_invoke_passes_event() {
        let mut registry = BehaviorRegistry::new();
        registry.register("Grow", grow);
        let mut callbacks = fresh();
        let slot = bind(&registry, &mut callbacks, "Grow").unwrap().unwrap();

        let mut node = Node::default();
        let repaint = invoke(
            &callbacks,
            slot,
            &mut node,
            HookEvent::Frame {
                delta: Duration::from_millis(500),
            },
        );

        assert!(repaint);
        assert!((node.area.x1 - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sentinel_never_invokes() {
        let callbacks = fresh();
        let mut node = Node::default();
        let mut state = NodeState::default();

        assert!(!invoke(&callbacks, CallbackSlot(0), &mut node, HookEvent::State(&mut state)));
    }

    #[test]
    fn test_callback_capacity_is_reported() {
        let mut registry = BehaviorRegistry::new();
        let names: Vec<String> = (0..MAX_CALLBACKS).map(|i| format!("B{i}")).collect();
        for name in &names {
            registry.register(name, grow);
        }
        let mut callbacks = fresh();

        for name in &names[..MAX_CALLBACKS - 1] {
            bind(&registry, &mut callbacks, name).unwrap();
        }
        let overflow = bind(&registry, &mut callbacks, &names[MAX_CALLBACKS - 1]);
        assert!(matches!(overflow, Err(UiError::CallbackCapacity(MAX_CALLBACKS))));
    }
}
