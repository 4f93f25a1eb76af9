//! # Frame Driver
//!
//! One iteration of the overlay loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 0. TICK          start the frame budget                      │
//! │ 1. DRAIN INPUT   pointer → hit-test + state hooks            │
//! │                  repaint → dirty, close → shutdown, else fwd │
//! │ 2. UPDATE        frame hooks in node-array order             │
//! │ 3. PAINT         only if dirty, then clear dirty             │
//! │ 4. RELOAD        if the watcher raised the flag              │
//! │ 5. WAIT          sleep out the rest of the frame budget      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the calling thread. The only state shared with
//! another thread is the [`ReloadFlag`].

use std::path::PathBuf;
use std::time::Duration;

use overlay_core::Rect;
use tracing::{error, info};

use crate::blueprint::{compile_files, compile_str, Scene};
use crate::callback::{invoke, BehaviorRegistry, HookEvent};
use crate::error::UiResult;
use crate::frame::FrameClock;
use crate::input::{dispatch_pointer, WindowEvent};
use crate::platform::Platform;
use crate::render::PaintBackend;
use crate::watch::ReloadFlag;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// The platform delivered a close request.
    CloseRequested,
}

impl Shutdown {
    /// Process exit code for this reason.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::CloseRequested => 1,
        }
    }
}

/// Flags owned by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppState {
    /// The surface must be repainted before the next idle.
    pub dirty: bool,
    /// Set once; the loop stops at the end of the iteration that set it.
    pub shutdown: Option<Shutdown>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dirty: true,
            shutdown: None,
        }
    }
}

/// Where the blueprint and style markup come from. Re-read in full on every
/// (re)load.
#[derive(Debug, Clone)]
pub enum MarkupSource {
    /// Markup files on disk.
    Files {
        /// Node tree.
        blueprint: PathBuf,
        /// Classes.
        style: PathBuf,
    },
    /// Markup held in memory.
    Inline {
        /// Node tree.
        blueprint: String,
        /// Classes.
        style: String,
    },
}

impl MarkupSource {
    fn compile_into(&self, bounds: Rect, registry: &BehaviorRegistry, scene: &mut Scene) -> UiResult<()> {
        match self {
            Self::Files { blueprint, style } => compile_files(bounds, blueprint, style, registry, scene),
            Self::Inline { blueprint, style } => compile_str(bounds, blueprint, style, registry, scene),
        }
    }

    /// Paths worth watching for changes.
    #[must_use]
    pub fn watch_paths(&self) -> Vec<PathBuf> {
        match self {
            Self::Files { blueprint, style } => vec![blueprint.clone(), style.clone()],
            Self::Inline { .. } => Vec::new(),
        }
    }
}

/// Owns the live scene and runs the frame loop over it.
#[derive(Debug)]
pub struct Driver {
    scene: Scene,
    /// Reload target; swapped with `scene` only when compilation succeeds.
    scratch: Scene,
    registry: BehaviorRegistry,
    source: MarkupSource,
    bounds: Rect,
    state: AppState,
    reload: ReloadFlag,
    clock: FrameClock,
}

impl Driver {
    /// Compiles `source` against `bounds` and returns a driver ready to run.
    ///
    /// # Errors
    ///
    /// Returns the compile error if the initial load fails.
    pub fn new(
        source: MarkupSource,
        registry: BehaviorRegistry,
        bounds: Rect,
        clock: FrameClock,
    ) -> UiResult<Self> {
        let mut scene = Scene::new();
        source.compile_into(bounds, &registry, &mut scene)?;

        Ok(Self {
            scene,
            scratch: Scene::new(),
            registry,
            source,
            bounds,
            state: AppState::default(),
            reload: ReloadFlag::new(),
            clock,
        })
    }

    /// Drains every pending platform event.
    ///
    /// A close request stops the drain; events behind it stay queued.
    pub fn process_events<P: Platform>(&mut self, platform: &mut P) {
        while let Some(event) = platform.poll_event() {
            match event {
                WindowEvent::Pointer(pointer) => {
                    if dispatch_pointer(&mut self.scene, pointer) {
                        self.state.dirty = true;
                    }
                }
                WindowEvent::Repaint => self.state.dirty = true,
                WindowEvent::CloseRequested => {
                    info!("close requested");
                    self.state.shutdown = Some(Shutdown::CloseRequested);
                    break;
                }
                WindowEvent::Other(_) => platform.forward(event),
            }
        }
    }

    /// Runs every bound frame hook in node-array order.
    pub fn update(&mut self, delta: Duration) {
        let Scene { nodes, callbacks, .. } = &mut self.scene;
        let mut repaint = false;

        for node in nodes.iter_mut() {
            if let Some(slot) = node.on_frame {
                repaint |= invoke(callbacks, slot, node, HookEvent::Frame { delta });
            }
        }

        if repaint {
            self.state.dirty = true;
        }
    }

    /// Paints the scene if it is dirty. Returns whether it painted.
    pub fn render<B: PaintBackend>(&mut self, backend: &mut B) -> bool {
        if !self.state.dirty {
            return false;
        }

        backend.paint(self.scene.nodes.as_slice(), self.scene.classes.as_slice());
        self.state.dirty = false;
        true
    }

    /// Recompiles the markup. The live scene is replaced only on success.
    ///
    /// # Errors
    ///
    /// Returns the compile error; the previous scene stays live.
    pub fn reload(&mut self) -> UiResult<()> {
        match self.source.compile_into(self.bounds, &self.registry, &mut self.scratch) {
            Ok(()) => {
                std::mem::swap(&mut self.scene, &mut self.scratch);
                self.state.dirty = true;
                info!(nodes = self.scene.nodes.len(), "markup reloaded");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "reload failed, keeping previous layout");
                Err(e)
            }
        }
    }

    /// Runs one iteration: input, update, paint, pending reload. The frame
    /// budget starts before input is drained.
    ///
    /// Returns the shutdown reason once a close has been requested.
    pub fn frame<P: Platform, B: PaintBackend>(&mut self, platform: &mut P, backend: &mut B) -> Option<Shutdown> {
        let delta = self.clock.tick();
        self.process_events(platform);
        self.update(delta);
        self.render(backend);

        if self.reload.take() {
            // Failure is logged and the previous scene kept.
            let _ = self.reload();
        }

        self.state.shutdown
    }

    /// Runs frames at the clock's cadence until a close is requested.
    pub fn run<P: Platform, B: PaintBackend>(&mut self, platform: &mut P, backend: &mut B) -> Shutdown {
        loop {
            if let Some(reason) = self.frame(platform, backend) {
                return reason;
            }
            self.clock.wait_for_next_frame();
        }
    }

    /// Runs at most `frames` frames. Returns the shutdown reason if one came first.
    pub fn run_frames<P: Platform, B: PaintBackend>(
        &mut self,
        platform: &mut P,
        backend: &mut B,
        frames: u64,
    ) -> Option<Shutdown> {
        for _ in 0..frames {
            if let Some(reason) = self.frame(platform, backend) {
                return Some(reason);
            }
            self.clock.wait_for_next_frame();
        }
        None
    }

    /// The live scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Loop flags.
    #[must_use]
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Returns true if the next render will paint.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    /// The shutdown reason, if a close was requested.
    #[must_use]
    pub fn shutdown(&self) -> Option<Shutdown> {
        self.state.shutdown
    }

    /// A handle to the reload flag, for a watcher thread.
    #[must_use]
    pub fn reload_flag(&self) -> ReloadFlag {
        self.reload.clone()
    }

    /// Where the markup is loaded from.
    #[must_use]
    pub fn source(&self) -> &MarkupSource {
        &self.source
    }

    /// The frame clock.
    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
