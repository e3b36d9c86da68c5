//! Thrust Core - conditional checks, transformation chains and event dispatch
//!
//! This crate provides the rule engine behind thrust's gameplay triggers:
//! - Runtime-tagged values (`Value`) and game payload records
//! - Relational operators and conditional checks over a value
//! - Conditional groups (OR of AND-groups, with per-item negation)
//! - Transformation steps chained into pipelines
//! - A registry of shared, immutable assets
//! - A dispatcher that wires named events through a group and a chain into
//!   a terminal effect
//!
//! ## Evaluation never fails
//!
//! Checks and transformations absorb type mismatches instead of returning
//! errors. A misconfigured asset degrades to a no-op; see each type for its
//! exact fallback.
//!
//! ## Effects are data
//!
//! Bindings produce [`EffectInvocation`]s. The game implements
//! [`EffectHandler`] for what it owns; `ScoreKeeper`, `ScreenShaker` and
//! `LevelStateTracker` are reference handlers.

mod check;
mod config;
mod dispatch;
pub mod effect;
mod error;
mod group;
mod identity;
mod level;
mod operator;
pub mod record;
mod registry;
mod score;
mod shake;
mod transform;
mod value;

pub use check::{AxisCheck, ConditionalCheck};
pub use config::DispatchConfig;
pub use dispatch::{Binding, Dispatcher};
pub use effect::{
    AnimationState, DispatchResult, Effect, EffectHandler, EffectInvocation,
};
pub use error::{Error, Result};
pub use group::{AndGroup, ConditionalGroup, ConditionalItem};
pub use identity::{AssetId, EventId};
pub use level::{LevelStateTracker, LevelTransition};
pub use operator::ConditionalOperator;
pub use record::{
    CharacterStats, EnumKind, LaunchField, LaunchInfo, LevelState, RespawnEvent,
    RespawnEventInfo, RespawnField, ScreenShakeBurstRequest, StatField,
};
pub use registry::Registry;
pub use score::ScoreKeeper;
pub use shake::ScreenShaker;
pub use transform::{SubChain, TransformChain, Transformation, MAX_DECIMALS};
pub use value::Value;

pub use glam::{DVec2, DVec3, DVec4};
