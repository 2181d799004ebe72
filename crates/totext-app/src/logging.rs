use tracing_subscriber::EnvFilter;

/// Human-readable logs on a terminal, JSON lines otherwise
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if atty::is(atty::Stream::Stdout) {
        builder.try_init()
    } else {
        builder.json().try_init()
    };

    if let Err(e) = result {
        eprintln!("logging already initialized: {e}");
    }
}
