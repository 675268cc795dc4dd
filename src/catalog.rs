//! Supplier Catalog

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    allocation::AllocationError,
    suppliers::{Supplier, SupplierKey},
    validation::InputError,
};

pub mod shared;

pub use shared::SharedCatalog;

/// Errors raised while adding suppliers to a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A supplier with the same name is already in the catalog.
    #[error("supplier {0:?} already exists")]
    DuplicateSupplier(String),

    /// Supplier fields failed validation.
    #[error(transparent)]
    InvalidInput(#[from] InputError),
}

/// Catalog of known suppliers, keyed by unique name.
///
/// Suppliers are stored in insertion order. Nothing is ever removed, so iteration
/// order ("catalog order") is stable for the lifetime of the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    suppliers: SlotMap<SupplierKey, Supplier>,
    names: FxHashMap<String, SupplierKey>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from suppliers, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSupplier`] if two suppliers share a name.
    pub fn with_suppliers(
        suppliers: impl IntoIterator<Item = Supplier>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for supplier in suppliers {
            catalog.insert(supplier)?;
        }

        Ok(catalog)
    }

    /// Add a supplier to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSupplier`] if the name is already taken.
    pub fn insert(&mut self, supplier: Supplier) -> Result<SupplierKey, CatalogError> {
        if self.names.contains_key(supplier.name()) {
            return Err(CatalogError::DuplicateSupplier(supplier.name().to_string()));
        }

        let name = supplier.name().to_string();
        let key = self.suppliers.insert(supplier);

        self.names.insert(name, key);

        Ok(key)
    }

    /// Look up a supplier by key.
    pub fn get(&self, key: SupplierKey) -> Option<&Supplier> {
        self.suppliers.get(key)
    }

    /// Look up a supplier by name.
    pub fn get_by_name(&self, name: &str) -> Option<&Supplier> {
        self.names.get(name).and_then(|key| self.suppliers.get(*key))
    }

    /// Iterate suppliers in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (SupplierKey, &Supplier)> {
        self.suppliers.iter()
    }

    /// Number of suppliers.
    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    /// Whether the catalog has no suppliers.
    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Suppliers of the given material, in catalog order. May be empty.
    pub fn matching(&self, material: &str) -> Candidates<'_> {
        Candidates {
            entries: self
                .suppliers
                .iter()
                .filter(|(_, supplier)| supplier.material() == material)
                .collect(),
        }
    }
}

/// Narrow the catalog to suppliers of `material`.
///
/// Matching is exact and case-sensitive.
///
/// # Errors
///
/// Returns [`AllocationError::NoMatchingSuppliers`] when nothing matches, in which case
/// the request cannot be satisfied and no solve should be attempted.
pub fn filter_suppliers<'a>(
    catalog: &'a Catalog,
    material: &str,
) -> Result<Candidates<'a>, AllocationError> {
    let candidates = catalog.matching(material);

    if candidates.is_empty() {
        return Err(AllocationError::NoMatchingSuppliers {
            material: material.to_string(),
        });
    }

    Ok(candidates)
}

/// Borrowed, catalog-ordered subset of suppliers.
#[derive(Debug, Clone, Default)]
pub struct Candidates<'a> {
    entries: SmallVec<[(SupplierKey, &'a Supplier); 10]>,
}

impl<'a> Candidates<'a> {
    /// Iterate the candidates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (SupplierKey, &'a Supplier)> + '_ {
        self.entries.iter().copied()
    }

    /// Iterate the candidate suppliers.
    pub fn suppliers(&self) -> impl Iterator<Item = &'a Supplier> + '_ {
        self.entries.iter().map(|(_, supplier)| *supplier)
    }

    /// Look up a candidate by name.
    pub fn get_by_name(&self, name: &str) -> Option<&'a Supplier> {
        self.suppliers().find(|supplier| supplier.name() == name)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combined capacity of all candidates.
    pub fn total_capacity(&self) -> f64 {
        self.suppliers().map(Supplier::capacity).sum()
    }
}
