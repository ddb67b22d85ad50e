use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter variables, most specific first.
const LOG_ENV_VARS: [&str; 2] = ["APIPROF_LOG", "RUST_LOG"];

fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Builds the filter from a directive string, falling back to the default
/// level when it is absent or does not parse.
fn build_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = default_level(verbose);
    match directive {
        Some(value) => EnvFilter::try_new(value).unwrap_or_else(|err| {
            eprintln!("Ignoring log filter '{}': {}", value, err);
            EnvFilter::new(fallback)
        }),
        None => EnvFilter::new(fallback),
    }
}

/// Installs the global fmt subscriber. Log lines go to stderr.
pub fn init_logging(verbose: bool, no_color: bool) {
    let directive = LOG_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok());

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(build_filter(directive.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Logging already initialised: {}", err);
    }
}
