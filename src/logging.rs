use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_DIRECTIVE: &str = "ukcalc=info";
pub const VERBOSE_DIRECTIVE: &str = "ukcalc=debug,info";

pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    }
}

/// `RUST_LOG` wins over the built-in directive. Logs go to stderr so CSV
/// and JSON on stdout stay clean.
pub fn init_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose)));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_crate_level_to_debug() {
        assert_eq!(filter_directive(false), "ukcalc=info");
        assert!(filter_directive(true).starts_with("ukcalc=debug"));
        assert!(EnvFilter::try_new(filter_directive(true)).is_ok());
    }
}
