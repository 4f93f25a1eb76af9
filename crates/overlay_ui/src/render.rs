//! Paint contract.
//!
//! The driver hands the whole node and class arrays to a [`PaintBackend`]
//! once per dirty frame. [`CommandRecorder`] is the reference backend: it
//! turns the scene into a flat command list a rasterizer can replay, and
//! can tessellate fills into GPU-ready vertices.

use overlay_core::Rect;
use tracing::trace;

use crate::node::Node;
use crate::style::{Class, Color};

/// Anything that can paint a resolved scene.
pub trait PaintBackend {
    /// Paints every node. Called only when the frame is dirty.
    fn paint(&mut self, nodes: &[Node], classes: &[Class]);
}

/// A render command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Fill {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// One edge of a rectangle outline.
    Edge {
        /// Start point (x, y).
        from: (f32, f32),
        /// End point (x, y).
        to: (f32, f32),
        /// Stroke color.
        color: Color,
    },
}

/// Records the commands for each painted frame.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    /// Commands from the most recent frame.
    commands: Vec<RenderCommand>,
    /// Frames painted so far.
    frames: u64,
}

impl CommandRecorder {
    /// Creates a new recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            frames: 0,
        }
    }

    /// Commands from the most recent frame.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of frames painted.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Tessellates the fills of the most recent frame into two triangles each.
    #[must_use]
    pub fn fill_vertices(&self) -> Vec<UIVertex> {
        let mut vertices = Vec::with_capacity(self.commands.len() * 6);

        for command in &self.commands {
            if let RenderCommand::Fill { bounds, color } = *command {
                let color = color.to_array();
                let top_left = UIVertex::new(bounds.x0, bounds.y0, 0.0, 0.0, color);
                let top_right = UIVertex::new(bounds.x1, bounds.y0, 1.0, 0.0, color);
                let bottom_left = UIVertex::new(bounds.x0, bounds.y1, 0.0, 1.0, color);
                let bottom_right = UIVertex::new(bounds.x1, bounds.y1, 1.0, 1.0, color);
                vertices.extend_from_slice(&[
                    top_left,
                    top_right,
                    bottom_left,
                    bottom_left,
                    top_right,
                    bottom_right,
                ]);
            }
        }

        vertices
    }
}

impl PaintBackend for CommandRecorder {
    fn paint(&mut self, nodes: &[Node], classes: &[Class]) {
        self.commands.clear();
        self.frames += 1;

        for (index, node) in nodes.iter().enumerate() {
            let Some(background) = node
                .class
                .and_then(|class| classes.get(class.index()))
                .and_then(|class| class.background.as_ref())
            else {
                continue;
            };

            let area = node.area;
            if let Some(color) = background.colour {
                self.commands.push(RenderCommand::Fill { bounds: area, color });
            }

            if let Some(color) = background.border {
                let corners = [
                    (area.x0, area.y0),
                    (area.x1, area.y0),
                    (area.x1, area.y1),
                    (area.x0, area.y1),
                ];
                for i in 0..corners.len() {
                    self.commands.push(RenderCommand::Edge {
                        from: corners[i],
                        to: corners[(i + 1) % corners.len()],
                        color,
                    });
                }
            }

            if let Some(image) = &background.image {
                trace!(node = index, image = image.as_str(), "image backgrounds are not painted");
            }
        }
    }
}

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UIVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UIVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}
