//! Conditional checks: predicates over a single runtime value
//!
//! Each check only understands some value types. What happens on a type
//! mismatch differs per check and is part of its contract:
//! - `Float` passes anything non-numeric, so a check wired to the wrong
//!   payload never blocks an event
//! - every other check fails on a mismatch

use crate::record::{LevelState, RespawnEvent};
use crate::{ConditionalOperator, Value};
use serde::{Deserialize, Serialize};

/// One axis of a [`ConditionalCheck::Vector2`] check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCheck {
    pub op: ConditionalOperator,
    pub threshold: f64,
}

impl AxisCheck {
    pub fn new(op: ConditionalOperator, threshold: f64) -> Self {
        Self { op, threshold }
    }

    pub fn passes(&self, value: f64) -> bool {
        self.op.evaluate(value, self.threshold)
    }
}

/// An authored predicate, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionalCheck {
    /// Compare a float or int against a threshold
    Float {
        op: ConditionalOperator,
        threshold: f64,
    },
    /// Per-axis comparison of a 2D vector; absent axes pass
    Vector2 {
        #[serde(default)]
        x: Option<AxisCheck>,
        #[serde(default)]
        y: Option<AxisCheck>,
    },
    /// Compare the length of a 2D, 3D or 4D vector against a threshold
    Magnitude {
        op: ConditionalOperator,
        threshold: f64,
    },
    LevelStateIs(LevelState),
    LevelStateIn(Vec<LevelState>),
    /// Matches a respawn event, or the event inside a respawn record
    RespawnEventIs(RespawnEvent),
    RespawnEventIn(Vec<RespawnEvent>),
}

impl ConditionalCheck {
    /// Evaluate this check against a value
    pub fn apply_check(&self, value: &Value) -> bool {
        match self {
            ConditionalCheck::Float { op, threshold } => match value.as_float() {
                Some(f) => op.evaluate(f, *threshold),
                None => true,
            },
            ConditionalCheck::Vector2 { x, y } => {
                let Value::Vec2(v) = value else {
                    return false;
                };
                if let Some(axis) = x {
                    if !axis.passes(v.x) {
                        return false;
                    }
                }
                y.map_or(true, |axis| axis.passes(v.y))
            }
            ConditionalCheck::Magnitude { op, threshold } => value
                .vector_magnitude()
                .is_some_and(|m| op.evaluate(m, *threshold)),
            ConditionalCheck::LevelStateIs(target) => {
                matches!(value, Value::LevelState(s) if s == target)
            }
            ConditionalCheck::LevelStateIn(targets) => {
                matches!(value, Value::LevelState(s) if targets.contains(s))
            }
            ConditionalCheck::RespawnEventIs(target) => {
                respawn_event(value).is_some_and(|e| e == *target)
            }
            ConditionalCheck::RespawnEventIn(targets) => {
                respawn_event(value).is_some_and(|e| targets.contains(&e))
            }
        }
    }

    /// Create a float threshold check
    pub fn float(op: ConditionalOperator, threshold: f64) -> Self {
        ConditionalCheck::Float { op, threshold }
    }

    /// Create a vector magnitude check
    pub fn magnitude(op: ConditionalOperator, threshold: f64) -> Self {
        ConditionalCheck::Magnitude { op, threshold }
    }
}

fn respawn_event(value: &Value) -> Option<RespawnEvent> {
    match value {
        Value::RespawnEvent(e) => Some(*e),
        Value::Respawn(info) => Some(info.event),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RespawnEventInfo;
    use glam::{DVec2, DVec3, DVec4};
    use ConditionalOperator::*;

    #[test]
    fn test_float_check() {
        let check = ConditionalCheck::float(GreaterThanOrEqual, 2.0);
        assert!(check.apply_check(&Value::Float(2.0)));
        assert!(check.apply_check(&Value::Int(3)));
        assert!(!check.apply_check(&Value::Float(1.9)));
    }

    #[test]
    fn test_float_check_passes_non_numeric() {
        let check = ConditionalCheck::float(LessThan, 0.0);
        assert!(check.apply_check(&Value::Null));
        assert!(check.apply_check(&Value::from("fuel")));
        assert!(check.apply_check(&Value::Vec2(DVec2::new(5.0, 5.0))));
    }

    #[test]
    fn test_vector2_axes() {
        let check = ConditionalCheck::Vector2 {
            x: Some(AxisCheck::new(GreaterThan, 0.0)),
            y: Some(AxisCheck::new(LessThan, 10.0)),
        };
        assert!(check.apply_check(&Value::Vec2(DVec2::new(1.0, 5.0))));
        assert!(!check.apply_check(&Value::Vec2(DVec2::new(-1.0, 5.0))));
        assert!(!check.apply_check(&Value::Vec2(DVec2::new(1.0, 15.0))));

        let only_y = ConditionalCheck::Vector2 {
            x: None,
            y: Some(AxisCheck::new(Equal, 2.0)),
        };
        assert!(only_y.apply_check(&Value::Vec2(DVec2::new(-100.0, 2.0))));

        let open = ConditionalCheck::Vector2 { x: None, y: None };
        assert!(open.apply_check(&Value::Vec2(DVec2::ZERO)));
    }

    #[test]
    fn test_vector2_rejects_other_types() {
        let check = ConditionalCheck::Vector2 { x: None, y: None };
        assert!(!check.apply_check(&Value::Float(1.0)));
        assert!(!check.apply_check(&Value::Vec3(DVec3::ZERO)));
    }

    #[test]
    fn test_magnitude_check() {
        let check = ConditionalCheck::magnitude(GreaterThan, 4.0);
        assert!(check.apply_check(&Value::Vec2(DVec2::new(3.0, 4.0))));
        assert!(!check.apply_check(&Value::Vec3(DVec3::new(1.0, 1.0, 1.0))));
        assert!(check.apply_check(&Value::Vec4(DVec4::splat(3.0))));
        assert!(!check.apply_check(&Value::Float(100.0)));
    }

    #[test]
    fn test_level_state_membership() {
        let is = ConditionalCheck::LevelStateIs(LevelState::Failed);
        assert!(is.apply_check(&Value::LevelState(LevelState::Failed)));
        assert!(!is.apply_check(&Value::LevelState(LevelState::Flying)));

        let any_end =
            ConditionalCheck::LevelStateIn(vec![LevelState::Failed, LevelState::Succeeded]);
        assert!(any_end.apply_check(&Value::LevelState(LevelState::Succeeded)));
        assert!(!any_end.apply_check(&Value::LevelState(LevelState::Paused)));
        assert!(!any_end.apply_check(&Value::from("Failed")));
    }

    #[test]
    fn test_respawn_event_accepts_record() {
        let check = ConditionalCheck::RespawnEventIs(RespawnEvent::Respawned);
        let info = RespawnEventInfo {
            event: RespawnEvent::Respawned,
            position: DVec3::ZERO,
            attempt: 1,
        };
        assert!(check.apply_check(&Value::Respawn(info)));
        assert!(check.apply_check(&Value::RespawnEvent(RespawnEvent::Respawned)));
        assert!(!check.apply_check(&Value::RespawnEvent(RespawnEvent::Died)));
        assert!(!check.apply_check(&Value::Null));

        let empty = ConditionalCheck::RespawnEventIn(vec![]);
        assert!(!empty.apply_check(&Value::Respawn(info)));
    }

    #[test]
    fn test_check_from_ron() {
        let check: ConditionalCheck =
            ron::from_str("Vector2(x: Some((op: GreaterThan, threshold: 1.0)))").unwrap();
        assert!(check.apply_check(&Value::Vec2(DVec2::new(2.0, -9.0))));
    }
}
