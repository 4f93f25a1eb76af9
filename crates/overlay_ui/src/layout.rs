//! Layout pass.
//!
//! Every node's rectangle is a fraction of its parent's resolved rectangle:
//!
//! ```text
//! parent box B = (x0, y0, x1, y1), W = x1 - x0, H = y1 - y0
//!
//! size   (fw, fh) -> width  W * fw, height H * fh
//! offset (fx, fy) -> origin (x0 + W * fx, y0 + H * fy)
//! ```
//!
//! A missing size collapses the node to zero extent; a missing offset puts
//! it at the parent's origin. The root is laid out against the window's
//! client rectangle, so every area ends up in window coordinates.

use overlay_core::Rect;

use crate::node::{NodeArray, NodeId};
use crate::style::{Class, ClassArray};

/// Resolves one rectangle from its class and its parent's box.
#[must_use]
pub fn resolve_area(class: Option<&Class>, parent: Rect) -> Rect {
    let width = parent.width();
    let height = parent.height();

    let (fw, fh) = class
        .and_then(|c| c.size)
        .map_or((0.0, 0.0), |size| (size.width, size.height));
    let (fx, fy) = class
        .and_then(|c| c.offset)
        .map_or((0.0, 0.0), |offset| (offset.left, offset.top));

    Rect::from_size(width * fw, height * fh).translate(parent.x0 + width * fx, parent.y0 + height * fy)
}

/// Resolves every node reachable from the root, pre-order.
///
/// Does nothing on an empty node array.
pub fn layout(nodes: &mut NodeArray, classes: &ClassArray, bounds: Rect) {
    if nodes.is_empty() {
        return;
    }
    place(nodes, classes, NodeId::ROOT, bounds);
}

fn place(nodes: &mut NodeArray, classes: &ClassArray, id: NodeId, parent: Rect) {
    let node = &mut nodes[id.index()];
    let class = node.class.and_then(|class| classes.get(class.index()));
    node.area = resolve_area(class, parent);

    let area = node.area;
    let children = node.children;
    for &child in children.as_slice() {
        place(nodes, classes, child, area);
    }
}
