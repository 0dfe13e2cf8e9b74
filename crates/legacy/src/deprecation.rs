//! Structured deprecation warnings for the legacy constructors.

use tracing::warn;

/// Target of every deprecation event emitted by this crate.
pub const DEPRECATION_TARGET: &str = "xmlservice::deprecation";

/// Warns that a legacy constructor was used.
pub(crate) fn constructor(legacy: &'static str, replacement: &'static str) {
    warn!(
        target: DEPRECATION_TARGET,
        legacy,
        replacement,
        "{legacy} is deprecated, use {replacement} instead"
    );
}

/// Warns that a legacy parameter was supplied and will not be honoured.
pub(crate) fn parameter(legacy: &'static str, parameter: &'static str, message: &str) {
    warn!(
        target: DEPRECATION_TARGET,
        legacy,
        parameter,
        "{message}"
    );
}
