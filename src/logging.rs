//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

use crate::error::{PipelineError, Result};

/// Default filter for a `-v` count, used when `RUST_LOG` is unset.
fn verbosity_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `LOG_FORMAT=json` switches to JSON lines. Stdout is left for results.
///
/// # Errors
///
/// Returns [`PipelineError::Unexpected`] if a global subscriber is already set.
pub fn init_tracing(verbose: u8) -> Result<()> {
    let format = std::env::var("LOG_FORMAT").unwrap_or_default();
    let filter = verbosity_filter(verbose);

    let result = match format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| PipelineError::Unexpected(format!("tracing init failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_an_error() {
        let _ = init_tracing(0);
        assert!(init_tracing(0).is_err());
    }
}
