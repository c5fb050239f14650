//! Crop and field catalog loading.

use std::path::Path;

use acsim_engine::{Catalog, Crop, Field};
use anyhow::Context as _;
use serde::Deserialize;

use crate::util;

const DEFAULT_CATALOG: &str = include_str!("../data/catalog.json");

/// On-disk layout of a catalog.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub crops: Vec<Crop>,
    pub fields: Vec<Field>,
}

impl CatalogFile {
    pub fn into_catalog(self) -> anyhow::Result<Catalog> {
        Catalog::new(self.crops, self.fields).context("Invalid catalog")
    }
}

/// Loads the catalog at `path`, or the built-in one.
pub fn load(path: Option<&Path>) -> anyhow::Result<Catalog> {
    let file = match path {
        Some(path) => util::read_json_file::<CatalogFile, _>("catalog", path)?,
        None => serde_json::from_str(DEFAULT_CATALOG).context("Failed to parse built-in catalog")?,
    };
    let catalog = file.into_catalog()?;
    tracing::debug!(
        crops = catalog.crops().len(),
        fields = catalog.fields().len(),
        "catalog loaded"
    );
    Ok(catalog)
}
