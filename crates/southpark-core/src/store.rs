//! Catalog files on disk
//!
//! One pretty-printed JSON file per region, overwritten on every run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::region::Region;
use crate::types::Catalog;

/// File name of a region's catalog, e.g. `addon-data-de.json`
pub fn catalog_file_name(region: Region) -> String {
    format!("addon-data-{}.json", region.code())
}

/// Path of a region's catalog inside `dir`
pub fn catalog_path(dir: &Path, region: Region) -> PathBuf {
    dir.join(catalog_file_name(region))
}

/// Read a previously written catalog
///
/// # Errors
/// `IoError` if the file cannot be read, `JsonError` if it is not a catalog
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write a catalog, replacing any existing file
///
/// Output is indented with four spaces.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    catalog.serialize(&mut serializer)?;
    fs::write(path, buf)?;
    Ok(())
}
