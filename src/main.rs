use std::env;
use std::io;
use std::process;

use packtree::cli::{Args, Command};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    tracing::debug!(version = packtree::VERSION, "{} starting", packtree::NAME);
    let command = Command::from_args(args);
    process::exit(command.run());
}

/// Install the global subscriber
///
/// `PACKTREE_LOG` takes an `EnvFilter` directive; `PACKTREE_LOG_FORMAT=json`
/// switches to JSON lines. Logs always go to stderr.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PACKTREE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "packtree=debug,info"
        } else {
            "packtree=info,warn"
        })
    });

    let format = env::var("PACKTREE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}
