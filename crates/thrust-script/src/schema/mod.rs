//! Schema definitions for RON asset files
//!
//! Definitions reference each other by [`AssetId`](thrust_core::AssetId).
//! The loader resolves them into shared assets once every file is read.

pub mod asset;
pub mod binding;
pub mod group;

pub use asset::{AssetFile, ChainDef, CheckDef, StepRef, TransformationDef};
pub use binding::BindingDef;
pub use group::{AndGroupDef, GroupDef, ItemDef};
