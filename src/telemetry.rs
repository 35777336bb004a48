use error_stack::{Result, ResultExt};
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_subscriber::{
    fmt::{format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    EnvFilter, Registry,
};

use crate::error::ApplicationError;

/// Passing this flag to any command turns on debug logs for the crate.
pub const VERBOSE_FLAG: &str = "--verbose";

/// The directives used when `RUST_LOG` is not set.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,geoguessr_explorer=debug"
    } else {
        "warn,geoguessr_explorer=info"
    }
}

/// Builds the subscriber writing log lines to `sink`.
///
/// Reports are printed to stdout, so `main` hands in stderr. Fetch spans are
/// logged when they close, which gives one line per request with its timing.
pub fn get_tracing_subscriber<Sink>(sink: Sink, verbose: bool) -> impl Subscriber
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let formatting_layer = tracing_subscriber::fmt::layer()
        .with_writer(sink)
        .with_target(verbose)
        .with_span_events(FmtSpan::CLOSE);

    Registry::default().with(env_filter).with(formatting_layer)
}

/// Installs `subscriber` for the whole process.
///
/// # Errors
/// If a global subscriber was already installed.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), ApplicationError> {
    set_global_default(subscriber)
        .change_context(ApplicationError::LoggingError {})
        .attach_printable("a log subscriber was already installed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_the_crate_level() {
        assert_eq!(default_directives(false), "warn,geoguessr_explorer=info");
        assert_eq!(default_directives(true), "warn,geoguessr_explorer=debug");
    }
}
