//! Transformations: pure `Value -> Value` steps composed into chains
//!
//! Every step declares the value types it understands. Anything else is
//! passed through unchanged so a chain never fails halfway.

use crate::record::{EnumKind, LaunchField, RespawnField, ScreenShakeBurstRequest, StatField};
use crate::Value;
use glam::{DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

/// Most decimal places `FormatNumber` prints; larger settings are capped
pub const MAX_DECIMALS: usize = 17;

/// A single authored transformation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transformation {
    // === Arithmetic ===
    /// Scale a scalar or vector
    Multiply { factor: f64 },
    /// Offset a scalar
    Add { amount: f64 },
    /// Raise a scalar to a power
    Power { exponent: f64 },
    /// Component-wise offset of a vector; unused components are ignored
    AddVector {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        z: f64,
        #[serde(default)]
        w: f64,
    },
    Clamp { min: f64, max: f64 },

    // === Geometric ===
    /// Unit vector in the same direction; zero stays zero
    Normalize,
    /// Vector length as a float
    Magnitude,

    // === Formatting ===
    /// Fixed-decimal text with optional prefix and suffix, at most
    /// [`MAX_DECIMALS`] places
    FormatNumber {
        decimals: usize,
        #[serde(default)]
        prefix: String,
        #[serde(default)]
        suffix: String,
    },
    /// Seconds as `MM:SS`, or `H:MM:SS` from one hour up
    FormatClock {
        #[serde(default)]
        hundredths: bool,
    },

    // === Enum / string ===
    EnumToString,
    StringToEnum { kind: EnumKind },

    // === Field extraction ===
    ExtractLaunch { field: LaunchField },
    ExtractRespawn { field: RespawnField },
    ExtractStat { stat: StatField },

    // === Record construction ===
    /// Build a screen shake burst from independent sub-chains
    CombineScreenShake {
        amplitude: SubChain,
        frequency: SubChain,
        duration: SubChain,
    },
}

impl Transformation {
    /// Apply this step to a value
    pub fn transform(&self, value: Value) -> Value {
        match self.apply(&value) {
            Some(out) => out,
            None => {
                trace!(
                    step = self.name(),
                    input = value.type_name(),
                    "transformation skipped, passing value through"
                );
                value
            }
        }
    }

    /// `None` when the input type is outside this step's domain
    fn apply(&self, value: &Value) -> Option<Value> {
        match self {
            Transformation::Multiply { factor } => match value {
                Value::Vec2(v) => Some(Value::Vec2(*v * *factor)),
                Value::Vec3(v) => Some(Value::Vec3(*v * *factor)),
                Value::Vec4(v) => Some(Value::Vec4(*v * *factor)),
                _ => value.as_float().map(|f| Value::Float(f * factor)),
            },
            Transformation::Add { amount } => value.as_float().map(|f| Value::Float(f + amount)),
            Transformation::Power { exponent } => {
                value.as_float().map(|f| Value::Float(f.powf(*exponent)))
            }
            Transformation::AddVector { x, y, z, w } => match value {
                Value::Vec2(v) => Some(Value::Vec2(*v + DVec2::new(*x, *y))),
                Value::Vec3(v) => Some(Value::Vec3(*v + DVec3::new(*x, *y, *z))),
                Value::Vec4(v) => Some(Value::Vec4(*v + DVec4::new(*x, *y, *z, *w))),
                _ => None,
            },
            Transformation::Clamp { min, max } => {
                value.as_float().map(|f| Value::Float(f.clamp(*min, *max)))
            }

            Transformation::Normalize => match value {
                Value::Vec2(v) => Some(Value::Vec2(v.normalize_or_zero())),
                Value::Vec3(v) => Some(Value::Vec3(v.normalize_or_zero())),
                Value::Vec4(v) => Some(Value::Vec4(v.normalize_or_zero())),
                _ => None,
            },
            Transformation::Magnitude => value.vector_magnitude().map(Value::Float),

            Transformation::FormatNumber {
                decimals,
                prefix,
                suffix,
            } => value.as_float().map(|f| {
                let decimals = (*decimals).min(MAX_DECIMALS);
                Value::String(format!("{prefix}{f:.decimals$}{suffix}"))
            }),
            Transformation::FormatClock { hundredths } => value
                .as_float()
                .map(|secs| Value::String(format_clock(secs, *hundredths))),

            Transformation::EnumToString => match value {
                Value::LevelState(s) => Some(Value::String(s.to_string())),
                Value::RespawnEvent(e) => Some(Value::String(e.to_string())),
                _ => None,
            },
            Transformation::StringToEnum { kind } => value.as_str().and_then(|s| kind.parse(s)),

            Transformation::ExtractLaunch { field } => match value {
                Value::Launch(info) => Some(field.get(info)),
                _ => None,
            },
            Transformation::ExtractRespawn { field } => match value {
                Value::Respawn(info) => Some(field.get(info)),
                _ => None,
            },
            Transformation::ExtractStat { stat } => match value {
                Value::Stats(stats) => Some(Value::Float(stat.get(stats))),
                _ => None,
            },

            Transformation::CombineScreenShake {
                amplitude,
                frequency,
                duration,
            } => Some(Value::ScreenShake(ScreenShakeBurstRequest {
                amplitude: amplitude.resolve(value),
                frequency: frequency.resolve(value),
                duration: duration.resolve(value),
            })),
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Transformation::Multiply { .. } => "multiply",
            Transformation::Add { .. } => "add",
            Transformation::Power { .. } => "power",
            Transformation::AddVector { .. } => "add_vector",
            Transformation::Clamp { .. } => "clamp",
            Transformation::Normalize => "normalize",
            Transformation::Magnitude => "magnitude",
            Transformation::FormatNumber { .. } => "format_number",
            Transformation::FormatClock { .. } => "format_clock",
            Transformation::EnumToString => "enum_to_string",
            Transformation::StringToEnum { .. } => "string_to_enum",
            Transformation::ExtractLaunch { .. } => "extract_launch",
            Transformation::ExtractRespawn { .. } => "extract_respawn",
            Transformation::ExtractStat { .. } => "extract_stat",
            Transformation::CombineScreenShake { .. } => "combine_screen_shake",
        }
    }

    /// Create a multiply step
    pub fn multiply(factor: f64) -> Self {
        Transformation::Multiply { factor }
    }

    /// Create an add step
    pub fn add(amount: f64) -> Self {
        Transformation::Add { amount }
    }
}

fn format_clock(secs: f64, hundredths: bool) -> String {
    let sign = if secs < 0.0 { "-" } else { "" };
    let total = secs.abs();
    let whole = total.floor() as u64;
    let (h, m, s) = (whole / 3600, (whole % 3600) / 60, whole % 60);

    let mut out = if h > 0 {
        format!("{sign}{h}:{m:02}:{s:02}")
    } else {
        format!("{sign}{m:02}:{s:02}")
    };
    if hundredths {
        let cs = ((total - total.floor()) * 100.0).floor() as u64;
        out.push_str(&format!(".{:02}", cs.min(99)));
    }
    out
}

/// An ordered list of shared steps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformChain {
    pub steps: Vec<Arc<Transformation>>,
}

impl TransformChain {
    pub fn new(steps: impl IntoIterator<Item = Arc<Transformation>>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Build a chain from owned steps
    pub fn of(steps: impl IntoIterator<Item = Transformation>) -> Self {
        Self::new(steps.into_iter().map(Arc::new))
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Thread a value through every step in order
    pub fn apply(&self, value: Value) -> Value {
        self.steps.iter().fold(value, |v, step| step.transform(v))
    }
}

/// One field of a record being constructed
///
/// An empty chain yields the literal `fallback`. A non-empty chain runs on
/// the combiner's input and its numeric output is used, or `fallback` when
/// the output is not a number.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubChain {
    #[serde(default)]
    pub chain: TransformChain,
    #[serde(default)]
    pub fallback: f64,
}

impl SubChain {
    pub fn literal(fallback: f64) -> Self {
        Self {
            chain: TransformChain::default(),
            fallback,
        }
    }

    pub fn chained(chain: TransformChain, fallback: f64) -> Self {
        Self { chain, fallback }
    }

    pub fn resolve(&self, input: &Value) -> f64 {
        if self.chain.is_empty() {
            return self.fallback;
        }
        self.chain
            .apply(input.clone())
            .as_float()
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CharacterStats, LaunchInfo, LevelState, RespawnEvent};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_chain_order_matters() {
        let forward = TransformChain::of([Transformation::multiply(2.0), Transformation::add(1.0)]);
        let reverse = TransformChain::of([Transformation::add(1.0), Transformation::multiply(2.0)]);
        assert_eq!(forward.apply(Value::Float(3.0)), Value::Float(7.0));
        assert_eq!(reverse.apply(Value::Float(3.0)), Value::Float(8.0));
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let chain = TransformChain::default();
        assert_eq!(chain.apply(Value::Int(5)), Value::Int(5));
    }

    #[test]
    fn test_mismatch_passes_through() {
        let value = Value::LevelState(LevelState::Flying);
        assert_eq!(Transformation::multiply(3.0).transform(value.clone()), value);
        assert_eq!(Transformation::Normalize.transform(Value::Float(2.0)), Value::Float(2.0));
        assert_eq!(
            Transformation::ExtractStat { stat: StatField::Mass }.transform(Value::Null),
            Value::Null
        );
    }

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(Transformation::add(0.5).transform(Value::Int(2)), Value::Float(2.5));
        assert_eq!(
            Transformation::Power { exponent: 2.0 }.transform(Value::Int(3)),
            Value::Float(9.0)
        );
    }

    #[test]
    fn test_vector_arithmetic() {
        let scaled =
            Transformation::multiply(2.0).transform(Value::Vec3(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(scaled, Value::Vec3(DVec3::new(2.0, 4.0, 6.0)));

        let offset = Transformation::AddVector { x: 1.0, y: -1.0, z: 5.0, w: 0.0 }
            .transform(Value::Vec2(DVec2::new(1.0, 1.0)));
        assert_eq!(offset, Value::Vec2(DVec2::new(2.0, 0.0)));

        let clamped = Transformation::Clamp { min: 0.0, max: 1.0 }.transform(Value::Float(4.0));
        assert_eq!(clamped, Value::Float(1.0));
    }

    #[test]
    fn test_clamp_keeps_nan() {
        let step = Transformation::Clamp { min: 0.0, max: 1.0 };
        let Value::Float(out) = step.transform(Value::Float(f64::NAN)) else {
            panic!("clamp changed the value type");
        };
        assert!(out.is_nan());
        assert_eq!(step.transform(Value::Float(-3.0)), Value::Float(0.0));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = Transformation::Normalize.transform(Value::Vec3(DVec3::new(3.0, -4.0, 12.0)));
        let twice = Transformation::Normalize.transform(once.clone());
        let (Value::Vec3(a), Value::Vec3(b)) = (once, twice) else {
            panic!("normalize changed the value type");
        };
        assert!(a.abs_diff_eq(b, 1e-12));
        assert!(approx(a.length(), 1.0));

        let zero = Transformation::Normalize.transform(Value::Vec2(DVec2::ZERO));
        assert_eq!(zero, Value::Vec2(DVec2::ZERO));
    }

    #[test]
    fn test_magnitude() {
        let out = Transformation::Magnitude.transform(Value::Vec2(DVec2::new(3.0, 4.0)));
        assert_eq!(out, Value::Float(5.0));
    }

    #[test]
    fn test_format_number() {
        let step = Transformation::FormatNumber {
            decimals: 2,
            prefix: "x".into(),
            suffix: " m/s".into(),
        };
        assert_eq!(step.transform(Value::Float(12.3456)), Value::from("x12.35 m/s"));
        assert_eq!(step.transform(Value::Int(7)), Value::from("x7.00 m/s"));

        let plain = Transformation::FormatNumber {
            decimals: 0,
            prefix: String::new(),
            suffix: String::new(),
        };
        assert_eq!(plain.transform(Value::Float(41.6)), Value::from("42"));
    }

    #[test]
    fn test_format_number_caps_decimals() {
        let step = Transformation::FormatNumber {
            decimals: 70_000,
            prefix: String::new(),
            suffix: String::new(),
        };
        let expected = format!("1.{}", "0".repeat(MAX_DECIMALS));
        assert_eq!(step.transform(Value::Float(1.0)), Value::String(expected));
    }

    #[test]
    fn test_format_clock() {
        let step = Transformation::FormatClock { hundredths: false };
        assert_eq!(step.transform(Value::Float(75.9)), Value::from("01:15"));
        assert_eq!(step.transform(Value::Float(3725.0)), Value::from("1:02:05"));
        assert_eq!(step.transform(Value::Float(-5.0)), Value::from("-00:05"));

        let precise = Transformation::FormatClock { hundredths: true };
        assert_eq!(precise.transform(Value::Float(61.25)), Value::from("01:01.25"));
    }

    #[test]
    fn test_enum_string_conversion() {
        let name = Transformation::EnumToString.transform(Value::RespawnEvent(RespawnEvent::Died));
        assert_eq!(name, Value::from("Died"));

        let parse = Transformation::StringToEnum { kind: EnumKind::LevelState };
        assert_eq!(
            parse.transform(Value::from("Succeeded")),
            Value::LevelState(LevelState::Succeeded)
        );
        assert_eq!(parse.transform(Value::from("nope")), Value::from("nope"));
    }

    #[test]
    fn test_field_extraction() {
        let launch = Value::Launch(LaunchInfo {
            burn_duration: 2.75,
            power: 0.5,
            direction: DVec2::X,
        });
        let burn = Transformation::ExtractLaunch { field: LaunchField::BurnDuration };
        assert_eq!(burn.transform(launch), Value::Float(2.75));

        let stats = Value::Stats(CharacterStats {
            turn_rate: 90.0,
            ..Default::default()
        });
        let turn = Transformation::ExtractStat { stat: StatField::TurnRate };
        assert_eq!(turn.transform(stats), Value::Float(90.0));
    }

    #[test]
    fn test_combine_screen_shake() {
        let combine = Transformation::CombineScreenShake {
            amplitude: SubChain::literal(2.5),
            frequency: SubChain::chained(TransformChain::of([Transformation::multiply(10.0)]), 1.0),
            duration: SubChain::literal(0.4),
        };
        let Value::ScreenShake(burst) = combine.transform(Value::Float(0.3)) else {
            panic!("combiner did not build a burst");
        };
        assert_eq!(burst.amplitude, 2.5);
        assert!(approx(burst.frequency, 3.0));
        assert_eq!(burst.duration, 0.4);
    }

    #[test]
    fn test_sub_chain_falls_back_on_non_numeric_output() {
        let sub = SubChain::chained(TransformChain::of([Transformation::EnumToString]), 9.0);
        assert_eq!(sub.resolve(&Value::LevelState(LevelState::Paused)), 9.0);
        assert_eq!(sub.resolve(&Value::Float(4.0)), 4.0);
    }

    #[test]
    fn test_chain_from_ron() {
        let chain: TransformChain = ron::from_str(
            "[ExtractLaunch(field: BurnDuration), \
              Multiply(factor: 2.0), \
              FormatClock(hundredths: false)]",
        )
        .unwrap();
        assert_eq!(chain.len(), 3);
        let launch = Value::Launch(LaunchInfo {
            burn_duration: 45.0,
            ..Default::default()
        });
        assert_eq!(chain.apply(launch), Value::from("01:30"));
    }
}
