//! # OVERLAY UI
//!
//! Data-driven widget layout with a fixed-cadence input/update/paint loop.
//! Two markup documents describe the interface: a blueprint (the node tree
//! and its behavior hooks) and a style sheet (named classes with percentage
//! size, offset and background). Both compile into flat, capacity-bounded
//! arrays that the frame driver walks every frame.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      OVERLAY PIPELINE                      │
//! ├────────────────────────────────────────────────────────────┤
//! │  Style.xml ─┐                                              │
//! │             ├─ compile → Scene { nodes, classes, callbacks }│
//! │  Blueprint ─┘               ↓                              │
//! │  Window events → hit-test → state hooks → dirty            │
//! │  Frame clock   → frame hooks            → dirty            │
//! │  dirty         → PaintBackend                              │
//! │  File watcher  → ReloadFlag → recompile + swap             │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use overlay_core::Rect;
//! use overlay_ui::{compile_str, BehaviorRegistry, Scene};
//!
//! let mut scene = Scene::new();
//! compile_str(
//!     Rect::new(0.0, 0.0, 200.0, 100.0),
//!     r#"<Node Class="Panel"/>"#,
//!     r#"<Class Name="Panel"><Size Width="50" Height="100"/></Class>"#,
//!     &BehaviorRegistry::new(),
//!     &mut scene,
//! )
//! .unwrap();
//!
//! assert_eq!(scene.nodes[0].area, Rect::new(0.0, 0.0, 100.0, 100.0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod blueprint;
pub mod callback;
pub mod driver;
pub mod error;
pub mod frame;
pub mod input;
pub mod layout;
pub mod markup;
pub mod node;
pub mod platform;
pub mod render;
pub mod style;
pub mod watch;

pub use blueprint::{compile, compile_files, compile_str, Scene};
pub use callback::{Behavior, BehaviorRegistry, CallbackSlot, HookEvent};
pub use driver::{AppState, Driver, MarkupSource, Shutdown};
pub use error::{UiError, UiResult};
pub use frame::{FrameClock, DEFAULT_FPS};
pub use input::{MouseButton, PointerEvent, PointerKind, WindowEvent};
pub use node::{Node, NodeId, NodeState};
pub use platform::{HeadlessPlatform, Platform};
pub use render::{CommandRecorder, PaintBackend, RenderCommand, UIVertex};
pub use style::{Class, ClassId, Color};
pub use watch::{FileWatcher, ReloadFlag};
