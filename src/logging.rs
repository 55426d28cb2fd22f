use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
/// Output goes to stderr so generated data can be piped from stdout.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "statvar_import=debug"
    } else {
        "statvar_import=info"
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
