//! Content loaders for reading ability and attribute data from files.
//!
//! Loaders convert RON files into interned catalogs and rule tables; the
//! formats are defined next to each loader.

pub mod abilities;
pub mod attributes;
pub mod factory;

pub use abilities::AbilityLoader;
pub use attributes::AttributeLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
