//! Conditional group definitions

use serde::{Deserialize, Serialize};
use thrust_core::AssetId;

/// A check reference with a negation flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub check: AssetId,
    #[serde(default)]
    pub negate: bool,
}

/// Items that must all pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AndGroupDef {
    #[serde(default)]
    pub all_of: Vec<ItemDef>,
}

/// A named OR of AND-groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDef {
    pub id: AssetId,
    #[serde(default)]
    pub any_of: Vec<AndGroupDef>,
}

impl GroupDef {
    /// Every check this group refers to
    pub fn check_refs(&self) -> impl Iterator<Item = &AssetId> {
        self.any_of
            .iter()
            .flat_map(|branch| branch.all_of.iter().map(|item| &item.check))
    }
}
