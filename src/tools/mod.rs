//! Command-line tools built on the image-access library
//!
//! Each tool prints a version banner, checks its arguments, performs one
//! library call sequence and maps the outcome to an exit status. The library
//! is reached through [`ImageLibrary`] so the tools can run against fakes.

pub mod glob;
pub mod open_close;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;

use crate::ewf::{self, AccessFlags, EwfHandle};

/// Version reported in the tools' banner
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Library seam
// =============================================================================

/// An open/close session on a set of image files
pub trait ImageHandle {
    fn open(&mut self, filenames: &[PathBuf], access_flags: AccessFlags) -> ewf::Result<()>;
    fn close(&mut self) -> ewf::Result<()>;
}

/// The image-access calls the tools need
pub trait ImageLibrary {
    type Handle: ImageHandle;

    fn version(&self) -> String;
    fn access_flags_read(&self) -> AccessFlags;
    fn new_handle(&self) -> ewf::Result<Self::Handle>;
    fn glob(&self, pattern: &str) -> ewf::Result<Vec<String>>;
}

/// The EWF implementation in [`crate::ewf`]
#[derive(Clone, Copy, Debug, Default)]
pub struct Libewf;

impl ImageHandle for EwfHandle {
    fn open(&mut self, filenames: &[PathBuf], access_flags: AccessFlags) -> ewf::Result<()> {
        EwfHandle::open(self, filenames, access_flags)
    }

    fn close(&mut self) -> ewf::Result<()> {
        EwfHandle::close(self)
    }
}

impl ImageLibrary for Libewf {
    type Handle = EwfHandle;

    fn version(&self) -> String {
        ewf::version().to_string()
    }

    fn access_flags_read(&self) -> AccessFlags {
        ewf::get_access_flags_read()
    }

    fn new_handle(&self) -> ewf::Result<EwfHandle> {
        Ok(EwfHandle::new())
    }

    fn glob(&self, pattern: &str) -> ewf::Result<Vec<String>> {
        ewf::glob(pattern)
    }
}

// =============================================================================
// Exit status
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::Failure => 1,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

// =============================================================================
// Shared output helpers
// =============================================================================

pub(crate) fn write_banner<L: ImageLibrary, W: Write>(
    out: &mut W,
    tool: &str,
    library: &L,
) -> io::Result<()> {
    writeln!(out, "{} {} (libewf {})\n", tool, TOOL_VERSION, library.version())
}

/// Print a failure headline followed by the library's error message
pub(crate) fn write_failure<W: Write>(
    out: &mut W,
    headline: &str,
    err: &ewf::EwfError,
) -> io::Result<()> {
    debug!(headline, %err, "Library call failed");
    writeln!(out, "{}\n", headline)?;
    writeln!(out, "{}", err)
}

pub(crate) enum ParsedArgs<T> {
    Args(T),
    /// Rendered `--help` text
    Help(String),
    /// Anything clap rejects is a usage error
    Usage,
}

pub(crate) fn parse_args<T: Parser>(args: &[OsString]) -> ParsedArgs<T> {
    match T::try_parse_from(args) {
        Ok(parsed) => ParsedArgs::Args(parsed),
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            ParsedArgs::Help(err.render().to_string())
        }
        Err(err) => {
            debug!(kind = ?err.kind(), "Rejected command line");
            ParsedArgs::Usage
        }
    }
}
