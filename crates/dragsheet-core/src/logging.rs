#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros so downstream crates can log through `dragsheet_core` without
//! naming `tracing` directly. With `tracing-json` it can also install a JSON
//! formatter for production hosts.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable consulted by [`init_json`] before falling back to the
/// provided default directive.
pub const LOG_ENV_VAR: &str = "DRAGSHEET_LOG";

/// Install a global JSON subscriber.
///
/// The filter is read from [`LOG_ENV_VAR`] when set, otherwise from
/// `default_directive` (e.g. `"dragsheet=debug"`). Returns an error if a
/// global subscriber is already installed or the directive does not parse.
#[cfg(feature = "tracing-json")]
pub fn init_json(
    default_directive: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::EnvFilter;

    let filter = match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive)?,
        _ => EnvFilter::try_new(default_directive)?,
    };

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn init_json_rejects_second_install() {
        // The first call may race other tests in the same binary; the second
        // call must always fail because a global subscriber now exists.
        let _ = init_json("dragsheet=debug");
        assert!(init_json("dragsheet=debug").is_err());
    }
}
