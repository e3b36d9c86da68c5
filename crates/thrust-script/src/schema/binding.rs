//! Event binding definitions

use serde::{Deserialize, Serialize};
use thrust_core::{AssetId, Effect, EventId};

/// Wires an event through an optional group and chain into an effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingDef {
    pub id: AssetId,
    pub event: EventId,
    /// Group ID; absent means the binding always fires
    #[serde(default)]
    pub condition: Option<AssetId>,
    /// Chain ID; absent means the parameter reaches the effect unchanged
    #[serde(default)]
    pub transform: Option<AssetId>,
    pub effect: Effect,
    #[serde(default)]
    pub priority: i32,
}
