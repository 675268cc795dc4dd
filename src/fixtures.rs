//! Fixtures
//!
//! Supplier catalogs stored as YAML:
//!
//! ```yaml
//! suppliers:
//!   - name: HarvestHorizon
//!     material: Crops
//!     cost: 5.0
//!     quality: 7
//!     delivery: 2.0
//!     capacity: 100
//!     location: LocationA
//! ```
//!
//! Entries are loaded in file order, which becomes the catalog order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    suppliers::{Supplier, SupplyTerms},
    validation::InputError,
};

/// Default directory holding fixture sets
pub const DEFAULT_FIXTURE_DIR: &str = "./fixtures";

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,

        /// Underlying error
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A supplier entry failed validation
    #[error("Invalid supplier {name:?}: {source}")]
    InvalidSupplier {
        /// Supplier name as written in the fixture
        name: String,

        /// Validation failure
        source: InputError,
    },

    /// Catalog construction error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Supplier catalog fixture file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFixture {
    /// Supplier entries, in catalog order
    #[serde(default)]
    pub suppliers: Vec<SupplierFixture>,
}

/// One supplier entry of a catalog fixture
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupplierFixture {
    /// Unique supplier name
    pub name: String,

    /// Raw-material category
    pub material: String,

    /// Cost per unit
    pub cost: f64,

    /// Quality score per unit
    pub quality: f64,

    /// Delivery time per unit
    pub delivery: f64,

    /// Maximum quantity
    pub capacity: f64,

    /// Descriptive location
    #[serde(default)]
    pub location: String,
}

impl TryFrom<SupplierFixture> for Supplier {
    type Error = FixtureError;

    fn try_from(fixture: SupplierFixture) -> Result<Self, Self::Error> {
        let terms = SupplyTerms {
            cost: fixture.cost,
            quality: fixture.quality,
            delivery: fixture.delivery,
            capacity: fixture.capacity,
        };

        Supplier::new(&fixture.name, &fixture.material, &fixture.location, terms).map_err(
            |source| FixtureError::InvalidSupplier {
                name: fixture.name.clone(),
                source,
            },
        )
    }
}

impl CatalogFixture {
    /// Parse a catalog fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the text is not a valid catalog fixture.
    pub fn parse(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Read a catalog fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    /// Read a named catalog set from `fixtures/catalogs/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_path(set_path(DEFAULT_FIXTURE_DIR, name))
    }

    /// Build a validated catalog from the fixture entries.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is invalid or two entries share a name.
    pub fn into_catalog(self) -> Result<Catalog, FixtureError> {
        let mut catalog = Catalog::new();

        for entry in self.suppliers {
            catalog.insert(Supplier::try_from(entry)?)?;
        }

        Ok(catalog)
    }
}

/// Path of a named catalog set under `base`.
pub fn set_path(base: impl AsRef<Path>, name: &str) -> PathBuf {
    base.as_ref().join("catalogs").join(format!("{name}.yml"))
}

/// Load a catalog from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or holds invalid suppliers.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    CatalogFixture::from_path(path)?.into_catalog()
}
