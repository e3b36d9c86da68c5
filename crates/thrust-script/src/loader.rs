//! RON asset loader

use crate::error::{Error, Result};
use crate::schema::{
    AssetFile, BindingDef, ChainDef, CheckDef, GroupDef, StepRef, TransformationDef,
};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thrust_core::{
    AndGroup, AssetId, Binding, ConditionalGroup, ConditionalItem, DispatchConfig, Dispatcher,
    Registry, TransformChain,
};
use tracing::{debug, info};

/// File name (without extension) treated as a [`DispatchConfig`]
pub const CONFIG_FILE_STEM: &str = "config";

/// Unresolved definitions gathered from one or more files
#[derive(Debug, Default)]
pub struct AssetDefs {
    pub checks: IndexMap<AssetId, CheckDef>,
    pub transformations: IndexMap<AssetId, TransformationDef>,
    pub chains: IndexMap<AssetId, ChainDef>,
    pub groups: IndexMap<AssetId, GroupDef>,
    pub bindings: IndexMap<AssetId, BindingDef>,
}

impl AssetDefs {
    /// Create empty definitions
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of definitions of every kind
    pub fn len(&self) -> usize {
        self.checks.len()
            + self.transformations.len()
            + self.chains.len()
            + self.groups.len()
            + self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolved, ready-to-run assets
#[derive(Debug)]
pub struct Assets {
    pub registry: Registry,
    pub dispatcher: Dispatcher,
}

/// Loader for RON asset files
pub struct Loader {
    defs: AssetDefs,
    config: DispatchConfig,
}

fn add_unique<T>(map: &mut IndexMap<AssetId, T>, id: AssetId, def: T) -> Result<()> {
    if map.contains_key(&id) {
        return Err(Error::DuplicateDefinition(id));
    }
    map.insert(id, def);
    Ok(())
}

fn resolving<T>(asset: &AssetId, result: thrust_core::Result<T>) -> Result<T> {
    result.map_err(|source| Error::Resolve {
        asset: asset.clone(),
        source,
    })
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            defs: AssetDefs::new(),
            config: DispatchConfig::default(),
        }
    }

    /// Load an asset file from a RON string
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: AssetFile = ron::from_str(content)?;

        for def in file.checks {
            add_unique(&mut self.defs.checks, def.id.clone(), def)?;
        }
        for def in file.transformations {
            add_unique(&mut self.defs.transformations, def.id.clone(), def)?;
        }
        for def in file.chains {
            add_unique(&mut self.defs.chains, def.id.clone(), def)?;
        }
        for def in file.groups {
            add_unique(&mut self.defs.groups, def.id.clone(), def)?;
        }
        for def in file.bindings {
            add_unique(&mut self.defs.bindings, def.id.clone(), def)?;
        }
        Ok(())
    }

    /// Replace the dispatch configuration from a RON string
    pub fn load_config_str(&mut self, content: &str) -> Result<()> {
        self.config = ron::from_str(content)?;
        Ok(())
    }

    /// Replace the dispatch configuration from a RON file
    pub fn load_config_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let content = fs::read_to_string(path)?;
        self.load_config_str(&content)
    }

    /// Load a single RON file
    ///
    /// `config.ron` is read as a [`DispatchConfig`]; any other file as assets.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_config = path.file_stem().and_then(|s| s.to_str()) == Some(CONFIG_FILE_STEM);
        debug!(path = %path.display(), config = is_config, "loading asset file");

        if is_config {
            self.load_config_str(&content)
        } else {
            self.load_str(&content)
        }
    }

    /// Load all RON files from a directory, recursing into subdirectories
    ///
    /// Files are read in path order so duplicate errors are reproducible.
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for file_path in entries {
            if file_path.is_dir() {
                self.load_directory(&file_path)?;
            } else if file_path.extension().is_some_and(|e| e == "ron") {
                self.load_file(&file_path)?;
            }
        }

        Ok(())
    }

    /// Get the current definitions (for inspection during loading)
    pub fn defs(&self) -> &AssetDefs {
        &self.defs
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Resolve every reference and build the registry and dispatcher
    pub fn finish(self) -> Result<Assets> {
        let Loader { defs, config } = self;
        let mut registry = Registry::new();

        for (id, def) in defs.checks {
            resolving(&id, registry.insert_check(id.clone(), def.check))?;
        }
        for (id, def) in defs.transformations {
            resolving(&id, registry.insert_transformation(id.clone(), def.step))?;
        }
        for (id, def) in defs.chains {
            let steps = def
                .steps
                .into_iter()
                .map(|step| match step {
                    StepRef::Ref(step_id) => resolving(&id, registry.transformation(&step_id)),
                    StepRef::Inline(step) => Ok(Arc::new(step)),
                })
                .collect::<Result<Vec<_>>>()?;
            resolving(&id, registry.insert_chain(id.clone(), TransformChain::new(steps)))?;
        }
        for (id, def) in defs.groups {
            let mut any_of = Vec::with_capacity(def.any_of.len());
            for branch in def.any_of {
                let mut all_of = Vec::with_capacity(branch.all_of.len());
                for item in branch.all_of {
                    let check = resolving(&id, registry.check(&item.check))?;
                    all_of.push(ConditionalItem {
                        check,
                        negate: item.negate,
                    });
                }
                any_of.push(AndGroup::new(all_of));
            }
            resolving(&id, registry.insert_group(id.clone(), ConditionalGroup::new(any_of)))?;
        }

        let mut dispatcher = Dispatcher::with_config(config);
        for (id, def) in defs.bindings {
            let mut binding =
                Binding::new(id.clone(), def.event, def.effect).with_priority(def.priority);
            if let Some(group_id) = &def.condition {
                binding = binding.with_condition(resolving(&id, registry.group(group_id))?);
            }
            if let Some(chain_id) = &def.transform {
                binding = binding.with_transform(resolving(&id, registry.chain(chain_id))?);
            }
            dispatcher.bind(binding);
        }

        info!(
            assets = registry.len(),
            bindings = dispatcher.len(),
            "assets resolved"
        );
        Ok(Assets {
            registry,
            dispatcher,
        })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
