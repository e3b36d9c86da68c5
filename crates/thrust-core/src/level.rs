//! Level state tracking driven by `BroadcastLevelState` effects

use crate::effect::{EffectHandler, EffectInvocation};
use crate::record::LevelState;
use crate::{Effect, Value};
use tracing::debug;

/// A change from one level state to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTransition {
    pub from: Option<LevelState>,
    pub to: LevelState,
}

/// Current level state and the transitions that led to it
#[derive(Debug, Clone, Default)]
pub struct LevelStateTracker {
    current: Option<LevelState>,
    history: Vec<LevelTransition>,
}

impl LevelStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<LevelState> {
        self.current
    }

    pub fn history(&self) -> &[LevelTransition] {
        &self.history
    }

    /// Move to `state`; repeating the current state is not a transition
    pub fn set(&mut self, state: LevelState) -> Option<LevelTransition> {
        if self.current == Some(state) {
            return None;
        }
        let transition = LevelTransition {
            from: self.current,
            to: state,
        };
        debug!(from = ?transition.from, to = %state, "level state changed");
        self.current = Some(state);
        self.history.push(transition);
        Some(transition)
    }
}

impl EffectHandler for LevelStateTracker {
    fn handle(&mut self, invocation: &EffectInvocation) {
        if let (Effect::BroadcastLevelState, Value::LevelState(state)) =
            (&invocation.effect, &invocation.value)
        {
            self.set(*state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut tracker = LevelStateTracker::new();
        assert_eq!(tracker.current(), None);

        let first = tracker.set(LevelState::PreLaunch).unwrap();
        assert_eq!(first.from, None);
        assert!(tracker.set(LevelState::PreLaunch).is_none());

        tracker.set(LevelState::Flying);
        assert_eq!(tracker.current(), Some(LevelState::Flying));
        assert_eq!(
            tracker.history().last(),
            Some(&LevelTransition {
                from: Some(LevelState::PreLaunch),
                to: LevelState::Flying,
            })
        );
    }

    #[test]
    fn test_handler_only_accepts_level_states() {
        let mut tracker = LevelStateTracker::new();
        tracker.handle(&EffectInvocation {
            binding: "b".into(),
            effect: Effect::BroadcastLevelState,
            value: Value::from("Failed"),
        });
        assert_eq!(tracker.current(), None);

        tracker.handle(&EffectInvocation {
            binding: "b".into(),
            effect: Effect::BroadcastLevelState,
            value: Value::LevelState(LevelState::Failed),
        });
        assert_eq!(tracker.current(), Some(LevelState::Failed));
    }
}
