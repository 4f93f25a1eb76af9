//! # OVERLAY
//!
//! Compiles the configured blueprint and style, then runs a headless session.
//!
//! ```bash
//! overlay --config overlay.toml --dump
//! overlay --frames 600
//! RUST_LOG=overlay_ui=debug overlay
//! ```

use std::path::PathBuf;

use overlay::{builtin_registry, OverlayConfig, Session};
use overlay_ui::{CommandRecorder, HeadlessPlatform};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: overlay [--config PATH] [--frames N] [--dump]";

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return;
    }

    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map_or_else(|| PathBuf::from("overlay.toml"), PathBuf::from);
    let frames: Option<u64> = match args.iter().position(|a| a == "--frames") {
        Some(i) => match args.get(i + 1).and_then(|s| s.parse().ok()) {
            Some(n) => Some(n),
            None => {
                eprintln!("--frames needs a number\n{USAGE}");
                std::process::exit(2);
            }
        },
        None => None,
    };
    let dump = args.iter().any(|a| a == "--dump");

    let config = match OverlayConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration failed");
            std::process::exit(2);
        }
    };

    let mut session = match Session::start(&config, builtin_registry()) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "cannot start overlay");
            std::process::exit(2);
        }
    };

    if dump {
        print!("{}", session.dump());
    }

    let mut platform = HeadlessPlatform::new();
    let mut backend = CommandRecorder::new();
    let shutdown = session.run(&mut platform, &mut backend, frames);

    info!(
        frames = session.driver().clock().frame_count(),
        late = session.driver().clock().late_frames(),
        painted = backend.frames(),
        "session ended"
    );

    if let Some(reason) = shutdown {
        drop(session);
        std::process::exit(reason.exit_code());
    }
}
