//! Input handling.
//!
//! Pointer events are routed through the node tree by hit-testing. A node
//! counts as hit only if it and every ancestor contain the pointer, so a
//! miss is inherited by the whole subtree. State transitions are pure
//! functions of (old state, event); the dispatcher applies them, runs the
//! node's state hook and commits the result.

use overlay_core::Point2;
use tracing::trace;

use crate::blueprint::Scene;
use crate::callback::{invoke, HookEvent};
use crate::node::{NodeArray, NodeId, NodeState, MAX_NODES};

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Pointer moved.
    Move,
    /// Button pressed.
    Down(MouseButton),
    /// Button released.
    Up(MouseButton),
    /// Wheel scrolled by the given number of notches.
    Wheel(i16),
}

/// A pointer event in window-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Pointer position.
    pub position: Point2,
    /// Event kind.
    pub kind: PointerKind,
}

impl PointerEvent {
    /// Creates a pointer event at `(x, y)`.
    #[must_use]
    pub const fn new(x: i16, y: i16, kind: PointerKind) -> Self {
        Self {
            position: Point2::new(x, y),
            kind,
        }
    }
}

/// Events delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Pointer input.
    Pointer(PointerEvent),
    /// The platform asks for the surface to be repainted.
    Repaint,
    /// The user asked to close the window.
    CloseRequested,
    /// Anything else, identified by the platform's message code.
    Other(u32),
}

impl NodeState {
    /// State after a pointer event that hit the node.
    ///
    /// Hover is set; each button latch is OR-ed with "this is that button's
    /// press", so a latch survives repeated presses and releases over the node.
    #[must_use]
    pub fn entered(self, kind: PointerKind) -> Self {
        Self {
            hovered: true,
            left_clicked: self.left_clicked || kind == PointerKind::Down(MouseButton::Left),
            right_clicked: self.right_clicked || kind == PointerKind::Down(MouseButton::Right),
            middle_clicked: self.middle_clicked || kind == PointerKind::Down(MouseButton::Middle),
        }
    }

    /// State after a pointer event that missed the node.
    ///
    /// Hover is cleared; a button latch clears only on that button's release.
    #[must_use]
    pub fn missed(self, kind: PointerKind) -> Self {
        Self {
            hovered: false,
            left_clicked: self.left_clicked && kind != PointerKind::Up(MouseButton::Left),
            right_clicked: self.right_clicked && kind != PointerKind::Up(MouseButton::Right),
            middle_clicked: self.middle_clicked && kind != PointerKind::Up(MouseButton::Middle),
        }
    }
}

/// One bit per node: set if the node was hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitSet {
    bits: [u64; MAX_NODES / 64],
}

impl HitSet {
    /// Classifies every node reachable from the root against `point`.
    #[must_use]
    pub fn classify(nodes: &NodeArray, point: Point2) -> Self {
        let mut set = Self::default();
        if !nodes.is_empty() {
            set.visit(nodes, NodeId::ROOT, point, false);
        }
        set
    }

    fn visit(&mut self, nodes: &NodeArray, id: NodeId, point: Point2, ancestor_missed: bool) {
        let node = &nodes[id.index()];
        let hit = !ancestor_missed && node.area.contains(point);
        if hit {
            self.insert(id.index());
        }

        for &child in node.children.as_slice() {
            self.visit(nodes, child, point, !hit);
        }
    }

    fn insert(&mut self, index: usize) {
        self.bits[index / 64] |= 1u64 << (index % 64);
    }

    /// Returns true if the node at `index` was hit.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < MAX_NODES && self.bits[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Number of nodes hit.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }
}

/// Applies a pointer event to every node in the scene.
///
/// Hit nodes run their state hook on every event; missed nodes only when
/// their state changes. Whatever the hook leaves in the proposed state is
/// committed. Returns true if any node's state changed.
pub fn dispatch_pointer(scene: &mut Scene, event: PointerEvent) -> bool {
    let hits = HitSet::classify(&scene.nodes, event.position);
    let Scene { nodes, callbacks, .. } = scene;
    let mut changed = false;

    for (index, node) in nodes.iter_mut().enumerate() {
        let previous = node.state;
        let hit = hits.contains(index);
        let mut proposed = if hit {
            previous.entered(event.kind)
        } else {
            previous.missed(event.kind)
        };

        if let Some(slot) = node.on_state {
            if hit || proposed != previous {
                let verdict = invoke(callbacks, slot, node, HookEvent::State(&mut proposed));
                trace!(node = index, verdict, "state hook");
            }
        }

        node.state = proposed;
        changed |= proposed != previous;
    }

    changed
}
