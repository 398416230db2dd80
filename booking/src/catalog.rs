//! Read-only catalog seams.
//!
//! Show and theatre metadata is owned by external collaborators; this core
//! consumes it through the narrow traits below and never mutates it. The
//! in-memory implementations back the demo and tests, and any host that
//! keeps its catalog in process.

use crate::types::{Show, ShowId, Theatre, TheatreId};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failure of a catalog lookup, unrelated to the identifier being unknown.
///
/// The coordinator surfaces this as an internal error; "not found" is the
/// `Ok(None)` case, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("catalog unavailable: {0}")]
pub struct CatalogError(pub String);

/// Resolves a show identifier to its metadata.
#[async_trait]
pub trait ShowCatalog: Send + Sync {
    /// Looks up a show. `Ok(None)` means the identifier is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backing store cannot be reached.
    async fn get_show(&self, id: &ShowId) -> Result<Option<Show>, CatalogError>;
}

/// Resolves a theatre identifier to its tax percentage.
#[async_trait]
pub trait TheatreCatalog: Send + Sync {
    /// Looks up a theatre. `Ok(None)` means the identifier is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backing store cannot be reached.
    async fn get_theatre(&self, id: &TheatreId) -> Result<Option<Theatre>, CatalogError>;
}

/// In-memory [`ShowCatalog`].
#[derive(Debug, Default)]
pub struct InMemoryShowCatalog {
    shows: RwLock<HashMap<ShowId, Show>>,
}

impl InMemoryShowCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a show. Catalog maintenance is the collaborator's
    /// concern; this exists so hosts and tests can seed data.
    pub async fn insert(&self, show: Show) {
        self.shows.write().await.insert(show.id, show);
    }
}

#[async_trait]
impl ShowCatalog for InMemoryShowCatalog {
    async fn get_show(&self, id: &ShowId) -> Result<Option<Show>, CatalogError> {
        Ok(self.shows.read().await.get(id).cloned())
    }
}

/// In-memory [`TheatreCatalog`].
#[derive(Debug, Default)]
pub struct InMemoryTheatreCatalog {
    theatres: RwLock<HashMap<TheatreId, Theatre>>,
}

impl InMemoryTheatreCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a theatre.
    pub async fn insert(&self, theatre: Theatre) {
        self.theatres.write().await.insert(theatre.id, theatre);
    }
}

#[async_trait]
impl TheatreCatalog for InMemoryTheatreCatalog {
    async fn get_theatre(&self, id: &TheatreId) -> Result<Option<Theatre>, CatalogError> {
        Ok(self.theatres.read().await.get(id).copied())
    }
}
