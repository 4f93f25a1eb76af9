//! Hot-reload watcher.
//!
//! A background thread polls the modification time of the markup files and
//! raises a [`ReloadFlag`] when one changes. The flag is the only state
//! shared with the frame loop: the watcher only sets it, the loop only
//! consumes it, and a change seen one poll late is fine.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, SystemTime};

use tracing::debug;

/// Set by the watcher, consumed by the frame loop.
#[derive(Debug, Clone, Default)]
pub struct ReloadFlag(Arc<AtomicBool>);

impl ReloadFlag {
    /// Creates a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag.
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Lowers the flag, returning whether it was raised.
    #[must_use]
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::Relaxed)
    }

    /// Returns whether the flag is raised without lowering it.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Handle to the polling thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct FileWatcher {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl FileWatcher {
    /// Starts polling `paths` every `interval`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn(paths: Vec<PathBuf>, interval: Duration, flag: ReloadFlag) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("overlay-watch".into())
            .spawn(move || {
                let mut seen: Vec<Option<SystemTime>> = paths.iter().map(|p| modified(p)).collect();

                while !thread_stop.load(Ordering::Relaxed) {
                    std::thread::sleep(interval);

                    for (path, last) in paths.iter().zip(seen.iter_mut()) {
                        let current = modified(path);
                        if current != *last {
                            debug!(path = %path.display(), "markup changed");
                            *last = current;
                            flag.request();
                        }
                    }
                }
            })?;

        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    /// Stops the thread and waits for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn modified(path: &std::path::Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
