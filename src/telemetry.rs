//! Logging setup
//!
//! Library code only emits `tracing` events. Where they end up is decided
//! by the subscriber the host installs, either with [`init_tracing`] or its
//! own.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `RUST_LOG`
///
/// Falls back to `default_directive` (e.g. `"info"` or
/// `"networking=debug"`) when `RUST_LOG` is unset or invalid. Fails if a
/// global subscriber is already installed.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    let filter = env_filter(default_directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    tracing::debug!("tracing initialized");
    Ok(())
}

fn env_filter(default_directive: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default_directive)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        assert!(env_filter("networking=debug,services=info").is_ok());
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing("debug");
        assert!(init_tracing("debug").is_err());
    }
}
