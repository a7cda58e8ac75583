//! Diagnostic logging setup
//!
//! Events go to stderr so command output on stdout stays scriptable.
//! `RUST_LOG` takes precedence over the built-in defaults.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "ledger=debug"
    } else {
        "ledger=warn"
    }
}

/// Initialize the global tracing subscriber
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "ledger=warn");
        assert_eq!(default_directive(true), "ledger=debug");
    }

    #[test]
    fn test_init_twice() {
        init_tracing(false);
        init_tracing(true);
    }
}
