//! glob - list the segment files of an EWF image
//!
//! Usage: glob filename

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, instrument};

use super::{parse_args, write_banner, write_failure, ImageLibrary, ParsedArgs, Status};
use crate::ewf::EwfError;

pub const TOOL_NAME: &str = "glob";

#[derive(Debug, Parser)]
#[command(name = "glob", about = "Glob Expert Witness Compression Format file(s)")]
struct GlobArgs {
    /// First segment file or base name of the image (e.g. image.E01)
    #[arg(allow_hyphen_values = true)]
    patterns: Vec<PathBuf>,
}

/// Run the tool with the full command line (`args[0]` is the program name)
#[instrument(skip_all)]
pub fn run<L: ImageLibrary, W: Write>(
    library: &L,
    args: &[OsString],
    out: &mut W,
) -> io::Result<Status> {
    write_banner(out, TOOL_NAME, library)?;

    let pattern = match parse_args::<GlobArgs>(args) {
        ParsedArgs::Args(GlobArgs { mut patterns }) if patterns.len() == 1 => {
            patterns.remove(0)
        }
        ParsedArgs::Help(help) => {
            write!(out, "{}", help)?;
            return Ok(Status::Success);
        }
        _ => {
            writeln!(out, "Usage: {} filename\n", TOOL_NAME)?;
            return Ok(Status::Failure);
        }
    };

    // Generated segment names are strings, so the pattern must be one too
    let Some(pattern) = pattern.to_str() else {
        let err = EwfError::InvalidArgument(format!(
            "filename is not valid UTF-8: {}",
            pattern.display()
        ));
        write_failure(out, "Unable to glob filename(s)", &err)?;
        return Ok(Status::Failure);
    };

    let filenames = match library.glob(pattern) {
        Ok(filenames) => filenames,
        Err(err) => {
            write_failure(out, "Unable to glob filename(s)", &err)?;
            return Ok(Status::Failure);
        }
    };

    debug!(pattern = %pattern, count = filenames.len(), "Globbed segment files");
    if !filenames.is_empty() {
        for filename in &filenames {
            writeln!(out, "{}", filename)?;
        }
        writeln!(out)?;
    }

    Ok(Status::Success)
}
