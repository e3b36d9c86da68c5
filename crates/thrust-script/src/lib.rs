//! Thrust Script - RON asset loader and schema definitions
//!
//! Loads authored gameplay assets from RON files:
//! - Conditional checks and groups
//! - Transformation steps and chains
//! - Event bindings wiring the two into effects
//! - Dispatch configuration (`config.ron`)
//!
//! Definitions refer to each other by ID and may be spread over any number
//! of files; [`Loader::finish`] resolves them into a shared
//! [`Registry`](thrust_core::Registry) and a ready
//! [`Dispatcher`](thrust_core::Dispatcher).

mod error;
mod loader;
pub mod schema;

pub use error::{Error, Result};
pub use loader::{AssetDefs, Assets, Loader, CONFIG_FILE_STEM};
pub use schema::{
    AndGroupDef, AssetFile, BindingDef, ChainDef, CheckDef, GroupDef, ItemDef, StepRef,
    TransformationDef,
};
