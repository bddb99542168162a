//! open_close - open and close EWF segment file(s)
//!
//! Usage: open_close filename(s)

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, instrument};

use super::{
    parse_args, write_banner, write_failure, ImageHandle, ImageLibrary, ParsedArgs, Status,
};

pub const TOOL_NAME: &str = "open_close";

#[derive(Debug, Parser)]
#[command(
    name = "open_close",
    about = "Open and close Expert Witness Compression Format file(s)"
)]
struct OpenCloseArgs {
    /// Segment files of one image (e.g. image.E01 image.E02)
    #[arg(allow_hyphen_values = true)]
    filenames: Vec<PathBuf>,
}

/// Run the tool with the full command line (`args[0]` is the program name)
#[instrument(skip_all)]
pub fn run<L: ImageLibrary, W: Write>(
    library: &L,
    args: &[OsString],
    out: &mut W,
) -> io::Result<Status> {
    write_banner(out, TOOL_NAME, library)?;

    let filenames = match parse_args::<OpenCloseArgs>(args) {
        ParsedArgs::Args(parsed) if !parsed.filenames.is_empty() => parsed.filenames,
        ParsedArgs::Help(help) => {
            write!(out, "{}", help)?;
            return Ok(Status::Success);
        }
        _ => {
            writeln!(out, "Usage: {} filename(s)\n", TOOL_NAME)?;
            return Ok(Status::Failure);
        }
    };

    let mut handle = match library.new_handle() {
        Ok(handle) => handle,
        Err(err) => {
            debug!(%err, "Handle creation failed");
            writeln!(out, "Missing handle object\n")?;
            return Ok(Status::Failure);
        }
    };

    if let Err(err) = handle.open(&filenames, library.access_flags_read()) {
        write_failure(out, "Unable to open file(s)", &err)?;
        return Ok(Status::Failure);
    }

    if let Err(err) = handle.close() {
        write_failure(out, "Unable to close file(s)", &err)?;
        return Ok(Status::Failure);
    }

    debug!(count = filenames.len(), "Opened and closed segment files");
    Ok(Status::Success)
}
