//! Dispatch configuration
//!
//! Controls how a [`Dispatcher`](crate::Dispatcher) walks the bindings of an
//! event. Loadable from RON through `thrust-script`.

use serde::{Deserialize, Serialize};

/// Configuration for event dispatch
///
/// # Example
///
/// ```
/// use thrust_core::DispatchConfig;
///
/// let config = DispatchConfig::default();
/// assert!(!config.first_match_only);
/// assert!(config.log_rejections);
///
/// let config = DispatchConfig::default().with_first_match_only(true);
/// assert!(config.first_match_only);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Stop after the first binding (in priority order) that fires
    pub first_match_only: bool,
    /// Emit a `trace` record for every binding whose conditions fail
    pub log_rejections: bool,
}

impl DispatchConfig {
    pub fn with_first_match_only(mut self, first_match_only: bool) -> Self {
        self.first_match_only = first_match_only;
        self
    }

    pub fn with_log_rejections(mut self, log_rejections: bool) -> Self {
        self.log_rejections = log_rejections;
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            first_match_only: false,
            log_rejections: true,
        }
    }
}
