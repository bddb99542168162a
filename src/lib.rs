//! Expert Witness Compression Format (EWF) segment tools
//!
//! - [`ewf`]: open/close handles on segment sets and segment filename globbing
//! - [`tools`]: the `open_close` and `glob` command-line tools
//! - [`logging`]: tracing setup shared by the binaries

pub mod common;
pub mod ewf;
pub mod logging;
pub mod tools;
