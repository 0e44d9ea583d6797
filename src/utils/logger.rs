use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// `RUST_LOG` wins when set; otherwise `debug` with `--verbose` and `info`
/// without. Output goes to stderr so reports on stdout stay pipeable.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();
}

/// Progress line for the shell and the one-shot runner
pub fn log_progress(step: usize, total: usize, message: impl std::fmt::Display) {
    eprintln!("[{}/{}] -> {}", step, total, message);
}
