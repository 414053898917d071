use tracing_subscriber::{EnvFilter, fmt, fmt::time::ChronoLocal, prelude::*};

use crate::config::LogFormat;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the default `info` level.
pub fn init(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoLocal::new("%H:%M:%S".to_string())),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()?,
    }

    Ok(())
}
