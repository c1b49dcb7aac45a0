//! Content factory for building catalogs from a data directory.

use std::path::{Path, PathBuf};

use crate::catalog::{AbilityCatalog, AttributeCatalog};
use crate::loaders::{AbilityLoader, AttributeLoader, LoadResult};
use crate::rules::RuleTable;

/// Loads all ability content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── attributes.ron
/// └── abilities.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the attribute sheet from `attributes.ron`.
    pub fn load_attributes(&self) -> LoadResult<AttributeCatalog> {
        let path = self.data_dir.join("attributes.ron");
        AttributeLoader::load(&path)
    }

    /// Load the ability book from `abilities.ron`.
    ///
    /// Cost attributes resolve against `attributes` (load via
    /// [`ContentFactory::load_attributes`]).
    pub fn load_abilities(
        &self,
        attributes: &AttributeCatalog,
    ) -> LoadResult<(AbilityCatalog, RuleTable)> {
        let path = self.data_dir.join("abilities.ron");
        AbilityLoader::load(&path, attributes)
    }
}
