// check-netgear library - public API

// Re-export error types
pub mod error;
pub use error::{CheckError, Result};

// Module declarations
pub mod cli;
pub mod commands;
pub mod core;
pub mod netgear;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::CheckConfig;
pub use crate::core::status::Status;

/// Initialize logging on stderr; stdout carries the plugin output.
///
/// Without `-v` the `RUST_LOG` environment variable decides, falling back
/// to warnings only.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .target(env_logger::Target::Stderr);

    if verbosity > 0 {
        builder.filter_level(match verbosity {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    }

    // A second initialisation (tests) is harmless
    let _ = builder.try_init();
}
