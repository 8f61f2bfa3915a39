#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::io::{self, stderr};

use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(stderr)
        .init();
    rookery::repl::repl()
}
