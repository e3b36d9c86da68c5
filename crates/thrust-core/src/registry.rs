//! Central registry of shared, immutable assets
//!
//! Checks, transformations, chains and groups are authored once and
//! referenced by many bindings. The registry owns one `Arc` per asset and
//! hands out clones of it.

use crate::transform::MAX_DECIMALS;
use crate::{
    AssetId, ConditionalCheck, ConditionalGroup, Error, Result, TransformChain, Transformation,
};
use indexmap::IndexMap;
use std::sync::Arc;

/// Assets by ID, in insertion order
#[derive(Debug, Default)]
pub struct Registry {
    checks: IndexMap<AssetId, Arc<ConditionalCheck>>,
    transformations: IndexMap<AssetId, Arc<Transformation>>,
    chains: IndexMap<AssetId, Arc<TransformChain>>,
    groups: IndexMap<AssetId, Arc<ConditionalGroup>>,
}

fn insert<T>(
    map: &mut IndexMap<AssetId, Arc<T>>,
    kind: &'static str,
    id: AssetId,
    asset: T,
) -> Result<Arc<T>> {
    if map.contains_key(&id) {
        return Err(Error::DuplicateAsset { kind, id });
    }
    let asset = Arc::new(asset);
    map.insert(id, asset.clone());
    Ok(asset)
}

fn lookup<T>(map: &IndexMap<AssetId, Arc<T>>, kind: &'static str, id: &AssetId) -> Result<Arc<T>> {
    map.get(id).cloned().ok_or_else(|| Error::AssetNotFound {
        kind,
        id: id.clone(),
    })
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_check(
        &mut self,
        id: impl Into<AssetId>,
        check: ConditionalCheck,
    ) -> Result<Arc<ConditionalCheck>> {
        let id = id.into();
        validate_check(&id, &check)?;
        insert(&mut self.checks, "check", id, check)
    }

    pub fn insert_transformation(
        &mut self,
        id: impl Into<AssetId>,
        step: Transformation,
    ) -> Result<Arc<Transformation>> {
        let id = id.into();
        validate_step(&id, &step)?;
        insert(&mut self.transformations, "transformation", id, step)
    }

    pub fn insert_chain(
        &mut self,
        id: impl Into<AssetId>,
        chain: TransformChain,
    ) -> Result<Arc<TransformChain>> {
        let id = id.into();
        for step in &chain.steps {
            validate_step(&id, step)?;
        }
        insert(&mut self.chains, "chain", id, chain)
    }

    pub fn insert_group(
        &mut self,
        id: impl Into<AssetId>,
        group: ConditionalGroup,
    ) -> Result<Arc<ConditionalGroup>> {
        insert(&mut self.groups, "group", id.into(), group)
    }

    pub fn check(&self, id: &AssetId) -> Result<Arc<ConditionalCheck>> {
        lookup(&self.checks, "check", id)
    }

    pub fn transformation(&self, id: &AssetId) -> Result<Arc<Transformation>> {
        lookup(&self.transformations, "transformation", id)
    }

    pub fn chain(&self, id: &AssetId) -> Result<Arc<TransformChain>> {
        lookup(&self.chains, "chain", id)
    }

    pub fn group(&self, id: &AssetId) -> Result<Arc<ConditionalGroup>> {
        lookup(&self.groups, "group", id)
    }

    pub fn check_ids(&self) -> impl Iterator<Item = &AssetId> {
        self.checks.keys()
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = &AssetId> {
        self.chains.keys()
    }

    pub fn group_ids(&self) -> impl Iterator<Item = &AssetId> {
        self.groups.keys()
    }

    /// Total number of assets of every kind
    pub fn len(&self) -> usize {
        self.checks.len() + self.transformations.len() + self.chains.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn invalid(id: &AssetId, reason: impl Into<String>) -> Error {
    Error::InvalidAsset {
        id: id.clone(),
        reason: reason.into(),
    }
}

fn validate_check(id: &AssetId, check: &ConditionalCheck) -> Result<()> {
    let thresholds: Vec<f64> = match check {
        ConditionalCheck::Float { threshold, .. }
        | ConditionalCheck::Magnitude { threshold, .. } => vec![*threshold],
        ConditionalCheck::Vector2 { x, y } => {
            x.iter().chain(y.iter()).map(|a| a.threshold).collect()
        }
        _ => Vec::new(),
    };
    if thresholds.iter().any(|t| t.is_nan()) {
        return Err(invalid(id, "threshold is NaN"));
    }
    Ok(())
}

fn validate_step(id: &AssetId, step: &Transformation) -> Result<()> {
    match step {
        Transformation::Clamp { min, max } if min.is_nan() || max.is_nan() || min > max => {
            Err(invalid(id, format!("clamp range {min}..{max} is empty")))
        }
        Transformation::FormatNumber { decimals, .. } if *decimals > MAX_DECIMALS => Err(invalid(
            id,
            format!("{decimals} decimals exceeds the maximum of {MAX_DECIMALS}"),
        )),
        Transformation::CombineScreenShake {
            amplitude,
            frequency,
            duration,
        } => {
            for sub in [amplitude, frequency, duration] {
                for inner in &sub.chain.steps {
                    validate_step(id, inner)?;
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AndGroup, ConditionalOperator, SubChain};

    #[test]
    fn test_insert_and_lookup_share() {
        let mut registry = Registry::new();
        let check = registry
            .insert_check(
                "fast",
                ConditionalCheck::magnitude(ConditionalOperator::GreaterThan, 4.0),
            )
            .unwrap();
        let again = registry.check(&AssetId::new("fast")).unwrap();
        assert!(Arc::ptr_eq(&check, &again));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = Registry::new();
        registry.insert_chain("c", TransformChain::default()).unwrap();
        let err = registry.insert_chain("c", TransformChain::default()).unwrap_err();
        assert!(matches!(err, Error::DuplicateAsset { kind: "chain", .. }));
        assert_eq!(err.to_string(), "Duplicate chain: c");
    }

    #[test]
    fn test_missing_asset() {
        let registry = Registry::new();
        let err = registry.group(&AssetId::new("nope")).unwrap_err();
        assert_eq!(err.to_string(), "group not found: nope");
    }

    #[test]
    fn test_invalid_assets() {
        let mut registry = Registry::new();
        assert!(registry
            .insert_check("nan", ConditionalCheck::float(ConditionalOperator::Equal, f64::NAN))
            .is_err());
        assert!(registry
            .insert_transformation("clamp", Transformation::Clamp { min: 2.0, max: 1.0 })
            .is_err());

        let nested = Transformation::CombineScreenShake {
            amplitude: SubChain::chained(
                TransformChain::of([Transformation::Clamp { min: 1.0, max: 0.0 }]),
                0.0,
            ),
            frequency: SubChain::literal(1.0),
            duration: SubChain::literal(1.0),
        };
        assert!(registry.insert_transformation("combine", nested).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_format_number_precision_limit() {
        let mut registry = Registry::new();
        let step = |decimals| Transformation::FormatNumber {
            decimals,
            prefix: String::new(),
            suffix: String::new(),
        };

        let err = registry
            .insert_transformation("huge", step(70_000))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAsset { .. }));
        assert!(registry
            .insert_chain("huge_chain", TransformChain::of([step(MAX_DECIMALS + 1)]))
            .is_err());

        assert!(registry.insert_transformation("max", step(MAX_DECIMALS)).is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_keep_insertion_order() {
        let mut registry = Registry::new();
        for id in ["b", "a", "c"] {
            registry
                .insert_group(id, ConditionalGroup::new([AndGroup::default()]))
                .unwrap();
        }
        let ids: Vec<&str> = registry.group_ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
