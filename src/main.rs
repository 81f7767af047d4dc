//! Executive registry entry point
//!
//! Configuration, logging, storage and serving are all driven by the CLI
//! module. Any fatal error is printed and the process exits non-zero.

use executive_registry::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
