//! Game-specific payload records and enums carried inside a [`Value`]
//!
//! Composite records never expose fields by string lookup. Each record has an
//! enumerated field selector whose accessor is resolved at compile time.

use crate::Value;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Lifecycle state of a level, broadcast to listeners when it changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum LevelState {
    Loading,
    PreLaunch,
    Flying,
    Paused,
    Succeeded,
    Failed,
}

/// Phase of the respawn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum RespawnEvent {
    Died,
    RespawnStarted,
    Respawned,
}

/// Which enum a string should be parsed back into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnumKind {
    LevelState,
    RespawnEvent,
}

impl EnumKind {
    /// Parse a variant name into a value of this kind
    pub fn parse(self, name: &str) -> Option<Value> {
        match self {
            EnumKind::LevelState => name.parse::<LevelState>().ok().map(Value::LevelState),
            EnumKind::RespawnEvent => name.parse::<RespawnEvent>().ok().map(Value::RespawnEvent),
        }
    }
}

/// Emitted when the rocket leaves the pad
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LaunchInfo {
    /// How long the engine burned, in seconds
    pub burn_duration: f64,
    /// Launch power as charged by the player
    pub power: f64,
    pub direction: DVec2,
}

/// Selector for a [`LaunchInfo`] field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchField {
    BurnDuration,
    Power,
    Direction,
}

impl LaunchField {
    pub fn get(self, info: &LaunchInfo) -> Value {
        match self {
            LaunchField::BurnDuration => Value::Float(info.burn_duration),
            LaunchField::Power => Value::Float(info.power),
            LaunchField::Direction => Value::Vec2(info.direction),
        }
    }
}

/// Payload of a respawn cycle event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RespawnEventInfo {
    pub event: RespawnEvent,
    pub position: DVec3,
    /// Number of respawns so far in this level
    pub attempt: u32,
}

/// Selector for a [`RespawnEventInfo`] field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespawnField {
    Event,
    Position,
    Attempt,
}

impl RespawnField {
    pub fn get(self, info: &RespawnEventInfo) -> Value {
        match self {
            RespawnField::Event => Value::RespawnEvent(info.event),
            RespawnField::Position => Value::Vec3(info.position),
            RespawnField::Attempt => Value::Int(i64::from(info.attempt)),
        }
    }
}

/// A single screen shake burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenShakeBurstRequest {
    pub amplitude: f64,
    pub frequency: f64,
    /// Seconds
    pub duration: f64,
}

impl ScreenShakeBurstRequest {
    pub const DEFAULT_FREQUENCY: f64 = 20.0;
    pub const DEFAULT_DURATION: f64 = 0.25;

    /// A burst with the given amplitude and default frequency and duration
    pub fn with_amplitude(amplitude: f64) -> Self {
        Self {
            amplitude,
            frequency: Self::DEFAULT_FREQUENCY,
            duration: Self::DEFAULT_DURATION,
        }
    }
}

/// Tunable stats of the player's rocket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CharacterStats {
    pub thrust: f64,
    pub mass: f64,
    pub fuel_capacity: f64,
    pub drag: f64,
    pub turn_rate: f64,
    pub max_speed: f64,
}

/// Selector for a [`CharacterStats`] field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum StatField {
    Thrust,
    Mass,
    FuelCapacity,
    Drag,
    TurnRate,
    MaxSpeed,
}

impl StatField {
    pub const ALL: [StatField; 6] = [
        StatField::Thrust,
        StatField::Mass,
        StatField::FuelCapacity,
        StatField::Drag,
        StatField::TurnRate,
        StatField::MaxSpeed,
    ];

    /// Typed accessor for this stat
    pub fn accessor(self) -> fn(&CharacterStats) -> f64 {
        match self {
            StatField::Thrust => |s: &CharacterStats| s.thrust,
            StatField::Mass => |s: &CharacterStats| s.mass,
            StatField::FuelCapacity => |s: &CharacterStats| s.fuel_capacity,
            StatField::Drag => |s: &CharacterStats| s.drag,
            StatField::TurnRate => |s: &CharacterStats| s.turn_rate,
            StatField::MaxSpeed => |s: &CharacterStats| s.max_speed,
        }
    }

    pub fn get(self, stats: &CharacterStats) -> f64 {
        (self.accessor())(stats)
    }
}
