//! Tracing setup for the command-line binary
//!
//! Library code only emits events; installing a subscriber is left to the
//! binary. `RUST_LOG` takes precedence over the defaults below.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default filter directive
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "spendwise=debug"
    } else {
        "spendwise=info"
    }
}

/// Install the global subscriber; later calls do nothing
///
/// Events go to stderr so command output on stdout stays clean.
pub fn init(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // A subscriber installed elsewhere (e.g. a test harness) wins
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "spendwise=info");
        assert_eq!(default_directive(true), "spendwise=debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init(false);
        init(true);
        tracing::debug!("still fine after repeated init");
    }
}
