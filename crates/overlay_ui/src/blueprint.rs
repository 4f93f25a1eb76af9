//! Blueprint compiler.
//!
//! Compiles a blueprint document (the node tree) and a style document (the
//! classes) into a [`Scene`] in three passes:
//!
//! 1. **Classes** - every `Class` declaration becomes one class record
//! 2. **Nodes** - depth-first over `Node` elements; each node gets its class
//!    index, its hook slots and up to four children
//! 3. **Layout** - pre-order from the root against the bounding box
//!
//! Unknown class or behavior names are not errors; the node simply has no
//! style or no hook. Structural problems (malformed markup, capacity
//! overruns) are errors, and the scene must not be used after one.

use std::path::Path;

use overlay_core::Rect;
use tracing::debug;

use crate::callback::{bind, reset_callbacks, BehaviorRegistry, CallbackArray, CallbackSlot};
use crate::error::{UiError, UiResult};
use crate::layout::layout;
use crate::markup::{self, Element};
use crate::node::{Node, NodeArray, NodeId, MAX_CHILDREN};
use crate::style::{compile_classes, find_class, ClassArray};

/// The compiled node, class and callback arrays.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Nodes; index 0 is the root.
    pub nodes: NodeArray,
    /// Style classes.
    pub classes: ClassArray,
    /// Bound behaviors; slot 0 is the unbound sentinel.
    pub callbacks: CallbackArray,
}

impl Scene {
    /// Creates an empty scene with all storage pre-allocated.
    #[must_use]
    pub fn new() -> Self {
        let mut callbacks = CallbackArray::new();
        reset_callbacks(&mut callbacks);

        Self {
            nodes: NodeArray::new(),
            classes: ClassArray::new(),
            callbacks,
        }
    }

    /// Empties every array, keeping the storage.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.classes.clear();
        reset_callbacks(&mut self.callbacks);
    }

    /// Gets a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles parsed blueprint and style documents into `scene`.
///
/// `scene` is cleared first.
///
/// # Errors
///
/// See [`UiError`]; on error `scene` holds a partial result.
pub fn compile(
    bounds: Rect,
    blueprint: &[Element],
    style: &[Element],
    registry: &BehaviorRegistry,
    scene: &mut Scene,
) -> UiResult<()> {
    scene.clear();

    compile_classes(style, &mut scene.classes)?;

    let root = blueprint.first().ok_or(UiError::MissingRoot)?;
    if root.name != "Node" {
        return Err(UiError::UnexpectedRoot(root.name.clone()));
    }
    build_node(root, registry, scene)?;

    layout(&mut scene.nodes, &scene.classes, bounds);

    debug!(
        nodes = scene.nodes.len(),
        classes = scene.classes.len(),
        callbacks = scene.callbacks.len(),
        "compiled blueprint"
    );
    Ok(())
}

/// Compiles blueprint and style markup given as strings.
///
/// # Errors
///
/// See [`compile`].
pub fn compile_str(
    bounds: Rect,
    blueprint: &str,
    style: &str,
    registry: &BehaviorRegistry,
    scene: &mut Scene,
) -> UiResult<()> {
    let blueprint = markup::parse(blueprint)?;
    let style = markup::parse(style)?;
    compile(bounds, &blueprint, &style, registry, scene)
}

/// Reads and compiles blueprint and style files.
///
/// # Errors
///
/// Returns [`UiError::Io`] for unreadable files, otherwise see [`compile`].
pub fn compile_files(
    bounds: Rect,
    blueprint: &Path,
    style: &Path,
    registry: &BehaviorRegistry,
    scene: &mut Scene,
) -> UiResult<()> {
    let blueprint = markup::load(blueprint)?;
    let style = markup::load(style)?;
    compile(bounds, &blueprint, &style, registry, scene)
}

fn build_node(element: &Element, registry: &BehaviorRegistry, scene: &mut Scene) -> UiResult<NodeId> {
    let (index, _) = scene
        .nodes
        .add(Node::default())
        .map_err(|e| UiError::NodeCapacity(e.capacity))?;

    let class_name = element.attribute("Class").unwrap_or_default();
    let class = find_class(&scene.classes, class_name);
    if class.is_none() && !class_name.is_empty() {
        debug!(node = index, class = class_name, "class not declared, node left unstyled");
    }

    let on_state = bind_hook(element, "onState", registry, &mut scene.callbacks)?;
    let on_frame = bind_hook(element, "onFrame", registry, &mut scene.callbacks)?;

    let node = &mut scene.nodes[index];
    node.class = class;
    node.on_state = on_state;
    node.on_frame = on_frame;

    for (position, child) in element.children_named("Node").enumerate() {
        if position == MAX_CHILDREN {
            return Err(UiError::TooManyChildren {
                node: index,
                limit: MAX_CHILDREN,
            });
        }

        let child_id = build_node(child, registry, scene)?;
        // The position check above guarantees a free slot.
        let _ = scene.nodes[index].children.push(child_id);
    }

    Ok(NodeId(index as u8))
}

/// A hook is named by an attribute or by the text of a child element.
fn bind_hook(
    element: &Element,
    hook: &str,
    registry: &BehaviorRegistry,
    callbacks: &mut CallbackArray,
) -> UiResult<Option<CallbackSlot>> {
    let name = element
        .attribute(hook)
        .or_else(|| element.child(hook).map(|child| child.text.as_str()))
        .filter(|name| !name.is_empty());

    match name {
        Some(name) => bind(registry, callbacks, name),
        None => Ok(None),
    }
}
