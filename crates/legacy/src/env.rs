//! Environment fallbacks used by the legacy constructors.

use std::collections::HashMap;

/// Password used when a constructor is given none.
pub const PASSWORD_VAR: &str = "PASSWORD";

/// Library XMLSERVICE is installed into, when `ilib` is not given.
pub const XMLSERVICE_VAR: &str = "XMLSERVICE";

/// Source of environment variables.
pub trait Environment {
    /// Returns the value of `key`, or `None` if it is unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
