use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a compact stderr subscriber. `RUST_LOG` wins over `directive`.
pub fn init(verbose: bool, directive: Option<&str>) {
    let fallback = match (directive, verbose) {
        (Some(d), _) => d.to_string(),
        (None, true) => "xmlbench=debug,info".to_string(),
        (None, false) => "xmlbench=info,warn".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
