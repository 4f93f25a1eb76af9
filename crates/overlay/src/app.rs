//! Session wiring: config → driver (+ optional watcher) → frame loop.

use std::fmt::Write as _;

use overlay_ui::{
    BehaviorRegistry, Driver, FileWatcher, FrameClock, MarkupSource, PaintBackend, Platform,
    Shutdown, UiError,
};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, OverlayConfig};

/// Errors starting a session.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The initial markup did not compile.
    #[error(transparent)]
    Ui(#[from] UiError),

    /// The watcher thread could not be started.
    #[error("cannot start markup watcher: {0}")]
    Watch(#[source] std::io::Error),
}

/// A running overlay: the driver plus, if enabled, its file watcher.
#[derive(Debug)]
pub struct Session {
    driver: Driver,
    /// Stops polling when the session is dropped.
    watcher: Option<FileWatcher>,
}

impl Session {
    /// Compiles the configured markup and starts the watcher if enabled.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the markup fails to compile or the watcher
    /// cannot be spawned.
    pub fn start(config: &OverlayConfig, registry: BehaviorRegistry) -> Result<Self, AppError> {
        let source = MarkupSource::Files {
            blueprint: config.assets.blueprint.clone(),
            style: config.assets.style.clone(),
        };
        let driver = Driver::new(
            source,
            registry,
            config.bounds(),
            FrameClock::new(config.frame.target_fps),
        )?;

        let watcher = if config.watch.enabled {
            let paths = driver.source().watch_paths();
            let watcher = FileWatcher::spawn(paths, config.poll_interval(), driver.reload_flag())
                .map_err(AppError::Watch)?;
            Some(watcher)
        } else {
            None
        };

        info!(
            nodes = driver.scene().nodes.len(),
            classes = driver.scene().classes.len(),
            watching = watcher.is_some(),
            "overlay session started"
        );

        Ok(Self { driver, watcher })
    }

    /// Runs until closed, or for at most `frames` frames.
    pub fn run<P: Platform, B: PaintBackend>(
        &mut self,
        platform: &mut P,
        backend: &mut B,
        frames: Option<u64>,
    ) -> Option<Shutdown> {
        match frames {
            Some(frames) => self.driver.run_frames(platform, backend, frames),
            None => Some(self.driver.run(platform, backend)),
        }
    }

    /// One line per node: index, resolved rectangle, class and hooks.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (index, node) in self.driver.scene().nodes.iter().enumerate() {
            let area = node.area;
            let _ = write!(
                out,
                "#{index:<3} ({:.1}, {:.1}, {:.1}, {:.1})",
                area.x0, area.y0, area.x1, area.y1
            );
            if let Some(class) = node.class {
                let _ = write!(out, " class={}", class.0);
            }
            if let Some(slot) = node.on_state {
                let _ = write!(out, " onState={}", slot.0);
            }
            if let Some(slot) = node.on_frame {
                let _ = write!(out, " onFrame={}", slot.0);
            }
            if !node.children.is_empty() {
                let children: Vec<String> = node.children.as_slice().iter().map(|id| id.0.to_string()).collect();
                let _ = write!(out, " children=[{}]", children.join(","));
            }
            out.push('\n');
        }
        out
    }

    /// The underlying driver.
    #[must_use]
    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Returns true if a watcher thread is running.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }
}
