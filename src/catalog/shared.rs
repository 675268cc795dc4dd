//! Shared Catalog

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    suppliers::{Supplier, SupplierKey},
};

/// Catalog handle that can be shared between request handlers.
///
/// Readers take an immutable [`Catalog`] snapshot and keep working on it even if
/// suppliers are added afterwards. Writers copy the catalog when a snapshot is still
/// in use, so nobody ever observes a half-applied insert.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl SharedCatalog {
    /// Wrap an existing catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Current catalog contents.
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.inner.read())
    }

    /// Add a supplier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSupplier`] if the name is already taken.
    pub fn add_supplier(&self, supplier: Supplier) -> Result<SupplierKey, CatalogError> {
        let mut guard = self.inner.write();

        // Reject before `make_mut` so a failed insert never forces a copy.
        if guard.get_by_name(supplier.name()).is_some() {
            return Err(CatalogError::DuplicateSupplier(supplier.name().to_string()));
        }

        let name = supplier.name().to_string();
        let key = Arc::make_mut(&mut guard).insert(supplier)?;

        debug!(supplier = %name, suppliers = guard.len(), "supplier added to catalog");

        Ok(key)
    }

    /// Number of suppliers currently in the catalog.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the catalog is currently empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl From<Catalog> for SharedCatalog {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}
