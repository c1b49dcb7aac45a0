//! Attribute sheet loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::AttributeCatalog;
use crate::loaders::{LoadResult, read_file};

/// One configured stat in an attribute sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub name: String,
    pub base_value: f32,

    /// Per-second drift of the base value; negative decays.
    #[serde(default)]
    pub regen_per_second: f32,
}

/// Attribute sheet structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeSheet {
    pub attributes: Vec<AttributeEntry>,
}

/// Loader for attribute sheets from RON files.
pub struct AttributeLoader;

impl AttributeLoader {
    /// Load an attribute sheet from a RON file, interning every name into
    /// a fresh catalog.
    pub fn load(path: &Path) -> LoadResult<AttributeCatalog> {
        let content = read_file(path)?;
        let sheet: AttributeSheet = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse attribute sheet RON: {}", e))?;

        let mut catalog = AttributeCatalog::new();
        for entry in sheet.attributes {
            catalog.register(entry.name, entry.base_value, entry.regen_per_second);
        }
        tracing::debug!(path = %path.display(), attributes = catalog.len(), "attribute sheet loaded");
        Ok(catalog)
    }
}
