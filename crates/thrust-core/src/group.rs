//! Conditional groups: an OR of AND-groups of checks
//!
//! A group passes when at least one of its branches passes. A branch passes
//! when every item in it passes, where an item's result is its check's
//! result flipped by `negate`.
//!
//! Two edge cases follow directly from those rules:
//! - a group with no branches never passes
//! - a branch with no items always passes

use crate::{ConditionalCheck, Value};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A shared check paired with a negation flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalItem {
    pub check: Arc<ConditionalCheck>,
    #[serde(default)]
    pub negate: bool,
}

impl ConditionalItem {
    pub fn new(check: Arc<ConditionalCheck>) -> Self {
        Self {
            check,
            negate: false,
        }
    }

    pub fn negated(check: Arc<ConditionalCheck>) -> Self {
        Self {
            check,
            negate: true,
        }
    }

    pub fn evaluate(&self, value: &Value) -> bool {
        self.check.apply_check(value) != self.negate
    }
}

/// Items that must all pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AndGroup {
    pub all_of: Vec<ConditionalItem>,
}

impl AndGroup {
    pub fn new(all_of: impl IntoIterator<Item = ConditionalItem>) -> Self {
        Self {
            all_of: all_of.into_iter().collect(),
        }
    }

    pub fn evaluate(&self, value: &Value) -> bool {
        self.all_of.iter().all(|item| item.evaluate(value))
    }
}

/// Branches of which at least one must pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionalGroup {
    pub any_of: Vec<AndGroup>,
}

impl ConditionalGroup {
    pub fn new(any_of: impl IntoIterator<Item = AndGroup>) -> Self {
        Self {
            any_of: any_of.into_iter().collect(),
        }
    }

    /// A group of one branch holding a single item
    pub fn single(item: ConditionalItem) -> Self {
        Self::new([AndGroup::new([item])])
    }

    pub fn evaluate(&self, value: &Value) -> bool {
        self.any_of.iter().any(|branch| branch.evaluate(value))
    }
}
