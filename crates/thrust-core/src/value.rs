//! Runtime-tagged values flowing through checks and transformations

use crate::record::{
    CharacterStats, LaunchInfo, LevelState, RespawnEvent, RespawnEventInfo,
    ScreenShakeBurstRequest,
};
use glam::{DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A payload handed to a binding by the game
///
/// Values are copied at every step of a chain; nothing holds a reference to
/// a value after a step returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    /// No payload
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Vec2(DVec2),
    Vec3(DVec3),
    Vec4(DVec4),
    LevelState(LevelState),
    RespawnEvent(RespawnEvent),
    Launch(LaunchInfo),
    Respawn(RespawnEventInfo),
    ScreenShake(ScreenShakeBurstRequest),
    Stats(CharacterStats),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get this value as a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Euclidean length of a 2, 3 or 4 dimensional vector
    pub fn vector_magnitude(&self) -> Option<f64> {
        match self {
            Value::Vec2(v) => Some(v.length()),
            Value::Vec3(v) => Some(v.length()),
            Value::Vec4(v) => Some(v.length()),
            _ => None,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Vec2(_) => "vec2",
            Value::Vec3(_) => "vec3",
            Value::Vec4(_) => "vec4",
            Value::LevelState(_) => "level_state",
            Value::RespawnEvent(_) => "respawn_event",
            Value::Launch(_) => "launch_info",
            Value::Respawn(_) => "respawn_info",
            Value::ScreenShake(_) => "screen_shake",
            Value::Stats(_) => "character_stats",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Vec2(v) => write!(f, "({}, {})", v.x, v.y),
            Value::Vec3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Value::Vec4(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            Value::LevelState(s) => write!(f, "{}", s),
            Value::RespawnEvent(e) => write!(f, "{}", e),
            Value::Launch(l) => write!(
                f,
                "launch {{ burn: {}, power: {} }}",
                l.burn_duration, l.power
            ),
            Value::Respawn(r) => write!(f, "respawn {{ {}, attempt: {} }}", r.event, r.attempt),
            Value::ScreenShake(s) => write!(
                f,
                "shake {{ amplitude: {}, frequency: {}, duration: {} }}",
                s.amplitude, s.frequency, s.duration
            ),
            Value::Stats(_) => write!(f, "stats"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<DVec2> for Value {
    fn from(v: DVec2) -> Self {
        Value::Vec2(v)
    }
}

impl From<DVec3> for Value {
    fn from(v: DVec3) -> Self {
        Value::Vec3(v)
    }
}

impl From<DVec4> for Value {
    fn from(v: DVec4) -> Self {
        Value::Vec4(v)
    }
}

impl From<LevelState> for Value {
    fn from(s: LevelState) -> Self {
        Value::LevelState(s)
    }
}

impl From<RespawnEvent> for Value {
    fn from(e: RespawnEvent) -> Self {
        Value::RespawnEvent(e)
    }
}

impl From<LaunchInfo> for Value {
    fn from(l: LaunchInfo) -> Self {
        Value::Launch(l)
    }
}

impl From<RespawnEventInfo> for Value {
    fn from(r: RespawnEventInfo) -> Self {
        Value::Respawn(r)
    }
}

impl From<ScreenShakeBurstRequest> for Value {
    fn from(s: ScreenShakeBurstRequest) -> Self {
        Value::ScreenShake(s)
    }
}

impl From<CharacterStats> for Value {
    fn from(s: CharacterStats) -> Self {
        Value::Stats(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Int(4).as_float(), Some(4.0));
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::Bool(true).as_float(), None);
    }

    #[test]
    fn test_vector_magnitude() {
        assert_eq!(Value::Vec2(DVec2::new(3.0, 4.0)).vector_magnitude(), Some(5.0));
        assert_eq!(
            Value::Vec3(DVec3::new(2.0, 3.0, 6.0)).vector_magnitude(),
            Some(7.0)
        );
        assert_eq!(Value::Vec4(DVec4::ONE).vector_magnitude(), Some(2.0));
        assert_eq!(Value::Float(5.0).vector_magnitude(), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::from(LevelState::Flying).type_name(), "level_state");
        assert_eq!(Value::from(DVec2::ZERO).type_name(), "vec2");
        assert_eq!(Value::default().type_name(), "null");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Vec2(DVec2::new(1.0, 2.0)).to_string(), "(1, 2)");
        assert_eq!(Value::from(LevelState::Failed).to_string(), "Failed");
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
    }
}
