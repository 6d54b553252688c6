//! bookshelf CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Errors are printed to
//! stderr and the process exits with status 1.

use bookshelf::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
