//! Open and close Expert Witness Compression Format file(s)
//!
//! Usage: open_close filename(s)

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use ewf_tools_lib::{logging, tools};

fn main() -> ExitCode {
    // Control log level with RUST_LOG env var:
    //   RUST_LOG=debug open_close image.E01 image.E02
    logging::init();

    let args: Vec<OsString> = std::env::args_os().collect();
    let mut stdout = io::stdout().lock();

    match tools::open_close::run(&tools::Libewf, &args, &mut stdout) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Unable to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}
