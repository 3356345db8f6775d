//! Diagnostics for the interpreter binary, written to stderr so they
//! never mix with program output.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// The level for `-v` repeated `verbose` times.
pub fn level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `RUST_LOG` wins when set; otherwise only this crate logs, at
/// `level(verbose)`.
///
/// ```bash
/// fractran programs/add.fr 72 --auto -vvv
/// RUST_LOG=fractran::registers=trace fractran programs/add.fr 72 --compiled
/// ```
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fractran={}", level(verbose).as_str().to_lowercase())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity() {
        assert_eq!(level(0), Level::WARN);
        assert_eq!(level(2), Level::DEBUG);
        assert_eq!(level(3), Level::TRACE);
        assert_eq!(level(9), Level::TRACE);
    }
}
