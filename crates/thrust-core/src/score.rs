//! Score tracking driven by `AddScore` effects

use crate::effect::{EffectHandler, EffectInvocation};
use crate::Effect;
use tracing::trace;

/// Running score for the current attempt plus the best seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreKeeper {
    score: i64,
    best: i64,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn best(&self) -> i64 {
        self.best
    }

    /// Add points, rounding fractional amounts to the nearest integer
    pub fn add(&mut self, points: f64) {
        self.score = self.score.saturating_add(points.round() as i64);
        self.best = self.best.max(self.score);
    }

    /// Start a new attempt, keeping the best score
    pub fn reset(&mut self) {
        self.score = 0;
    }
}

impl EffectHandler for ScoreKeeper {
    fn handle(&mut self, invocation: &EffectInvocation) {
        if !matches!(invocation.effect, Effect::AddScore) {
            return;
        }
        match invocation.value.as_float() {
            Some(points) => self.add(points),
            None => trace!(
                binding = %invocation.binding,
                value = invocation.value.type_name(),
                "score ignored non-numeric value"
            ),
        }
    }
}
