//! Backabit - command-line tool for eased transforms and multi-scale artboard export

use std::process::ExitCode;

use backabit::cli;

fn main() -> ExitCode {
    cli::run()
}
