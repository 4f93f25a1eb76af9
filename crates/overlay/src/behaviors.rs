//! Built-in native behaviors.
//!
//! | Name       | Hook      | Effect                                    |
//! |------------|-----------|-------------------------------------------|
//! | `LogState` | `onState` | logs hover and click transitions          |
//! | `Heartbeat`| `onFrame` | logs the frame delta at trace level       |

use overlay_ui::{BehaviorRegistry, HookEvent, Node};
use tracing::{info, trace};

/// Logs the node's state whenever it changes.
pub fn log_state(node: &mut Node, event: HookEvent<'_>) -> bool {
    let HookEvent::State(proposed) = event else {
        return false;
    };

    if *proposed != node.state {
        info!(
            area = ?node.area,
            hovered = proposed.hovered,
            left = proposed.left_clicked,
            right = proposed.right_clicked,
            middle = proposed.middle_clicked,
            "node state"
        );
    }
    false
}

/// Logs every frame's delta.
pub fn heartbeat(node: &mut Node, event: HookEvent<'_>) -> bool {
    if let HookEvent::Frame { delta } = event {
        trace!(area = ?node.area, delta_us = delta.as_micros() as u64, "heartbeat");
    }
    false
}

/// Registry holding every built-in behavior.
#[must_use]
pub fn builtin_registry() -> BehaviorRegistry {
    let mut registry = BehaviorRegistry::new();
    registry.register("LogState", log_state).register("Heartbeat", heartbeat);
    registry
}
