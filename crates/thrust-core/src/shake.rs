//! Screen shake bursts driven by `ScreenShake` effects
//!
//! Bursts overlap; the strongest one at any moment wins. Each burst decays
//! linearly over its duration.

use crate::effect::{EffectHandler, EffectInvocation};
use crate::record::ScreenShakeBurstRequest;
use crate::{Effect, Value};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveBurst {
    request: ScreenShakeBurstRequest,
    remaining: f64,
}

impl ActiveBurst {
    fn strength(&self) -> f64 {
        self.request.amplitude * (self.remaining / self.request.duration)
    }
}

/// Active screen shake bursts
#[derive(Debug, Clone, Default)]
pub struct ScreenShaker {
    bursts: Vec<ActiveBurst>,
}

impl ScreenShaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a burst; bursts with no duration or amplitude are dropped
    pub fn push(&mut self, request: ScreenShakeBurstRequest) {
        if request.duration <= 0.0 || request.amplitude <= 0.0 {
            return;
        }
        self.bursts.push(ActiveBurst {
            request,
            remaining: request.duration,
        });
    }

    /// Advance time by `dt` seconds, expiring finished bursts
    pub fn advance(&mut self, dt: f64) {
        for burst in &mut self.bursts {
            burst.remaining -= dt;
        }
        self.bursts.retain(|b| b.remaining > 0.0);
    }

    fn strongest(&self) -> Option<&ActiveBurst> {
        self.bursts
            .iter()
            .max_by(|a, b| a.strength().total_cmp(&b.strength()))
    }

    /// Current amplitude of the strongest burst, zero when idle
    pub fn amplitude(&self) -> f64 {
        self.strongest().map_or(0.0, ActiveBurst::strength)
    }

    /// Frequency of the strongest burst
    pub fn frequency(&self) -> Option<f64> {
        self.strongest().map(|b| b.request.frequency)
    }

    pub fn is_shaking(&self) -> bool {
        !self.bursts.is_empty()
    }
}

impl EffectHandler for ScreenShaker {
    fn handle(&mut self, invocation: &EffectInvocation) {
        if !matches!(invocation.effect, Effect::ScreenShake) {
            return;
        }
        match &invocation.value {
            Value::ScreenShake(request) => self.push(*request),
            other => match other.as_float() {
                Some(amplitude) => self.push(ScreenShakeBurstRequest::with_amplitude(amplitude)),
                None => trace!(
                    binding = %invocation.binding,
                    value = other.type_name(),
                    "shake ignored value"
                ),
            },
        }
    }
}
