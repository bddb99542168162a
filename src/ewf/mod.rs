//! EWF (Expert Witness Format) segment set access
//!
//! This module provides the image-access calls the command-line tools are
//! built on:
//!
//! - **version**: library version string
//! - **get_access_flags_read**: read-only access flags
//! - **EwfHandle**: open a segment set, then close it again
//! - **glob**: expand a filename into the segment files of one image
//! - **check_file_signature**: detect EWF segment files by signature
//!
//! ## Segment Files
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ v1 file header (13 bytes)                                    │
//! │  - signature: "EVF\x09\x0d\x0a\xff\x00" (E01, s01)           │
//! │               "LVF\x09\x0d\x0a\xff\x00" (L01)                │
//! │  - fields_start (1), segment number (u16), fields_end (0)    │
//! ├──────────────────────────────────────────────────────────────┤
//! │ v2 file header (32 bytes)                                    │
//! │  - signature: "EVF2\x0d\x0a\x81\x00" (Ex01)                  │
//! │               "LEF2\x0d\x0a\x81\x00" (Lx01)                  │
//! │  - major, minor, compression method, segment number (u32),   │
//! │    set identifier (16 bytes)                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ewf_tools_lib::ewf::{self, EwfHandle};
//!
//! let filenames = ewf::glob("/path/to/image.E01")?;
//!
//! let mut handle = EwfHandle::new();
//! handle.open(&filenames, ewf::get_access_flags_read())?;
//! println!("{} segments", handle.segment_count());
//! handle.close()?;
//! # Ok::<(), ewf::EwfError>(())
//! ```

mod error;
mod glob;
mod handle;
mod header;
mod types;

pub use error::{EwfError, Result};
pub use glob::glob;
pub use handle::EwfHandle;
pub use header::check_file_signature;
pub use types::{get_access_flags_read, AccessFlags, SegmentFileHeader, SegmentFormat};

/// Version of the image-access library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
