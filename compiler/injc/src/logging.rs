//! Tracing setup for the CLI.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
///
/// The filter comes from `INJ_LOG` (`INJ_LOG=inj_validate=debug`), else
/// `info` when `verbose`, else `warn`. Setting `INJ_LOG_TREE` renders spans
/// as an indented tree instead of flat lines.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let default = if verbose { "info" } else { "warn" };
        let filter = EnvFilter::try_from_env("INJ_LOG").unwrap_or_else(|_| EnvFilter::new(default));

        if std::env::var_os("INJ_LOG_TREE").is_some() {
            let _ = tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .try_init();
        } else {
            let _ = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .try_init();
        }
    });
}
