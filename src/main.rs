//! osk - Command-line tool for inspecting and walking on-screen keyboard palettes

use std::process::ExitCode;

use osk::cli;

fn main() -> ExitCode {
    cli::run()
}
