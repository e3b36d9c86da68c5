//! Relational operators used by scalar and magnitude checks

use serde::{Deserialize, Serialize};

/// A comparison between an incoming value and an authored threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionalOperator {
    LessThan,
    LessThanOrEqual,
    /// Exact IEEE equality, no tolerance
    Equal,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ConditionalOperator {
    /// Compare `value` against `threshold`
    pub fn evaluate(self, value: f64, threshold: f64) -> bool {
        match self {
            ConditionalOperator::LessThan => value < threshold,
            ConditionalOperator::LessThanOrEqual => value <= threshold,
            ConditionalOperator::Equal => value == threshold,
            ConditionalOperator::GreaterThan => value > threshold,
            ConditionalOperator::GreaterThanOrEqual => value >= threshold,
        }
    }
}
