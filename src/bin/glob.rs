//! Glob Expert Witness Compression Format file(s)
//!
//! Usage: glob filename

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use ewf_tools_lib::{logging, tools};

fn main() -> ExitCode {
    logging::init();

    let args: Vec<OsString> = std::env::args_os().collect();
    let mut stdout = io::stdout().lock();

    match tools::glob::run(&tools::Libewf, &args, &mut stdout) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Unable to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}
