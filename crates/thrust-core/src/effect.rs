//! Terminal effects fired by bindings
//!
//! Effects are data. The dispatcher never plays animations or shakes a
//! camera itself; it hands each [`EffectInvocation`] to an [`EffectHandler`]
//! owned by the game.

use crate::{AssetId, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An animation state name with its hash computed once up front
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AnimationState {
    name: String,
    hash: u32,
}

impl AnimationState {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let hash = state_hash(&name);
        Self { name, hash }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }
}

impl fmt::Debug for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:08x}", self.name, self.hash)
    }
}

impl From<String> for AnimationState {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<AnimationState> for String {
    fn from(state: AnimationState) -> Self {
        state.name
    }
}

/// 32-bit FNV-1a
fn state_hash(name: &str) -> u32 {
    name.bytes().fold(0x811c_9dc5, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}

/// What a binding does once its conditions pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Play an animation state; the value is ignored
    PlayAnimation(AnimationState),
    /// Enable or disable components
    SetComponentsEnabled {
        components: Vec<AssetId>,
        enabled: bool,
    },
    /// Flip the enabled flag of components
    ToggleComponents { components: Vec<AssetId> },
    /// Shake the screen with a burst request, or a bare amplitude
    ScreenShake,
    /// Announce a new level state
    BroadcastLevelState,
    /// Add a numeric value to the score
    AddScore,
    /// Show a value as text on a label
    SetText { target: AssetId },
}

impl Effect {
    /// Create a play animation effect
    pub fn play(state: impl Into<String>) -> Self {
        Effect::PlayAnimation(AnimationState::new(state))
    }

    /// Create a set text effect
    pub fn text(target: impl Into<AssetId>) -> Self {
        Effect::SetText {
            target: target.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Effect::PlayAnimation(_) => "play_animation",
            Effect::SetComponentsEnabled { .. } => "set_components_enabled",
            Effect::ToggleComponents { .. } => "toggle_components",
            Effect::ScreenShake => "screen_shake",
            Effect::BroadcastLevelState => "broadcast_level_state",
            Effect::AddScore => "add_score",
            Effect::SetText { .. } => "set_text",
        }
    }
}

/// A fired effect together with the transformed value it consumes
#[derive(Debug, Clone, PartialEq)]
pub struct EffectInvocation {
    /// The binding that fired
    pub binding: AssetId,
    pub effect: Effect,
    pub value: Value,
}

/// Receives effects as bindings fire
///
/// Implemented by the game for whatever it owns: animators, UI labels,
/// the camera rig, scoring.
pub trait EffectHandler {
    fn handle(&mut self, invocation: &EffectInvocation);
}

impl<H: EffectHandler + ?Sized> EffectHandler for &mut H {
    fn handle(&mut self, invocation: &EffectInvocation) {
        (**self).handle(invocation)
    }
}

/// Result of dispatching one or more events
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    /// Effects that fired, in dispatch order
    pub invocations: Vec<EffectInvocation>,
    /// Bindings whose conditions failed
    pub rejected: Vec<AssetId>,
}

impl DispatchResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fired(&self) -> bool {
        !self.invocations.is_empty()
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: DispatchResult) {
        self.invocations.extend(other.invocations);
        self.rejected.extend(other.rejected);
    }

    /// Replay every invocation into a handler
    pub fn apply(&self, handler: &mut dyn EffectHandler) {
        for invocation in &self.invocations {
            handler.handle(invocation);
        }
    }
}
