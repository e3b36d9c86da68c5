//! Check, transformation and chain definitions

use super::{BindingDef, GroupDef};
use serde::{Deserialize, Serialize};
use thrust_core::{AssetId, ConditionalCheck, Transformation};

/// A named check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDef {
    pub id: AssetId,
    pub check: ConditionalCheck,
}

/// A named transformation step that chains can share
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationDef {
    pub id: AssetId,
    pub step: Transformation,
}

/// One entry of a chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepRef {
    /// A shared step defined under `transformations`
    Ref(AssetId),
    /// A step used only by this chain
    Inline(Transformation),
}

/// A named transformation chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainDef {
    pub id: AssetId,
    #[serde(default)]
    pub steps: Vec<StepRef>,
}

/// Everything one RON asset file may define; every section is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetFile {
    pub checks: Vec<CheckDef>,
    pub transformations: Vec<TransformationDef>,
    pub chains: Vec<ChainDef>,
    pub groups: Vec<GroupDef>,
    pub bindings: Vec<BindingDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_def_steps() {
        let chain: ChainDef = ron::from_str(
            r#"(id: "burn_text", steps: [Ref("burn"), Inline(FormatClock(hundredths: true))])"#,
        )
        .unwrap();
        assert_eq!(chain.id.as_str(), "burn_text");
        assert!(matches!(&chain.steps[0], StepRef::Ref(id) if id.as_str() == "burn"));
        assert!(matches!(
            chain.steps[1],
            StepRef::Inline(Transformation::FormatClock { hundredths: true })
        ));
    }

    #[test]
    fn test_empty_file() {
        let file: AssetFile = ron::from_str("()").unwrap();
        assert!(file.checks.is_empty());
        assert!(file.bindings.is_empty());
    }
}
