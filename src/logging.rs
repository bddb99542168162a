//! Logging and tracing configuration for the EWF tools
//!
//! Log output goes to stderr; stdout is reserved for the tools' own output.
//!
//! # Environment Variable Control
//!
//! Set `RUST_LOG` to control log levels at runtime:
//! ```bash
//! RUST_LOG=debug open_close image.E01                 # All debug logs
//! RUST_LOG=ewf_tools_lib::ewf=trace glob image.E01    # Trace for the ewf module
//! ```
//!
//! Without `RUST_LOG` only warnings and errors are shown, or debug output
//! when built with the `debug-logging` feature.

use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn default_filter() -> EnvFilter {
    if cfg!(feature = "debug-logging") {
        EnvFilter::new("ewf_tools_lib=debug")
    } else {
        EnvFilter::new("ewf_tools_lib=warn")
    }
}

/// Initialize the logging/tracing system
///
/// Call this once at startup; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact(),
    );

    let _ = tracing::subscriber::set_global_default(subscriber);
}
