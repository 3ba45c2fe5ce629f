//! Diagnostic tracing setup for the `bang` binary.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str =
    "warn,bang_copier=debug,bang_copier_conf=debug,bang_copier_io_fs=debug,bang_copier_log=debug";

/// Tracing options chosen on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecTraceOptions {
    /// Raise `bang_copier*` targets to `debug`.
    pub verbose: bool,
    /// Emit ANSI colours.
    pub ansi: bool,
}

/// Install a stderr subscriber. `RUST_LOG` wins over `verbose`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(spec_options: SpecTraceOptions) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if spec_options.verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(spec_options.ansi)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init()
        .is_ok()
}
