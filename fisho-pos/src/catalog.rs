//! Catalog resolver
//!
//! Lists stores, categories and a store's sellable inventory. Every list
//! passes through [`retain_live`] before it leaves this module, so inactive
//! or soft-deleted records never reach the cart or the display.

use fisho_client::{FishoApi, HttpClient};
use shared::models::{Activatable, CatalogEntry, Category, Store};

use crate::error::{PosError, PosResult};
use crate::guard::{LatestRequest, Ticket};
use crate::listing::{Listing, RowUpdate};

/// Keep only active, non-deleted records
pub fn retain_live<T: Activatable>(items: &mut Vec<T>) {
    items.retain(Activatable::is_live);
}

/// Read-only catalog queries over the backend API
pub struct CatalogResolver<'a, C> {
    api: &'a FishoApi<C>,
}

impl<'a, C: HttpClient> CatalogResolver<'a, C> {
    pub fn new(api: &'a FishoApi<C>) -> Self {
        Self { api }
    }

    pub async fn stores(&self) -> PosResult<Vec<Store>> {
        let mut stores = self.api.stores().await?;
        retain_live(&mut stores);
        Ok(stores)
    }

    pub async fn categories(&self, store_id: Option<&str>) -> PosResult<Vec<Category>> {
        let mut categories = self.api.categories(store_id).await?;
        retain_live(&mut categories);
        Ok(categories)
    }

    /// Live entries of one store, each with only its live variants
    pub async fn inventory(&self, store_id: &str) -> PosResult<Vec<CatalogEntry>> {
        let mut entries = self.api.store_inventory(store_id).await?;
        let fetched = entries.len();
        retain_live(&mut entries);
        for entry in &mut entries {
            retain_live(&mut entry.variants);
        }
        tracing::debug!(store_id, fetched, live = entries.len(), "Resolved store inventory");
        Ok(entries)
    }
}

/// Category and free-text narrowing of a resolved catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category_id: Option<String>,
    pub search: String,
}

impl CatalogFilter {
    pub fn new(category_id: Option<String>, search: impl Into<String>) -> Self {
        Self {
            category_id,
            search: search.into(),
        }
    }

    /// Category is an exact id match; text is a case-insensitive substring of
    /// the product name or any variant name. A blank term matches everything.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if let Some(category_id) = &self.category_id {
            if entry.category_id.as_deref() != Some(category_id.as_str()) {
                return false;
            }
        }
        let needle = self.search.trim();
        needle.is_empty() || entry.matches_text(&needle.to_lowercase())
    }

    pub fn narrow<'e, I>(&self, entries: I) -> Vec<&'e CatalogEntry>
    where
        I: IntoIterator<Item = &'e CatalogEntry>,
    {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// What [`CatalogView::apply`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Entries replaced; carries the new count
    Replaced(usize),
    /// Error recorded, previous entries kept
    Failed,
    /// A newer request was started; response dropped
    Stale,
}

/// Last resolved inventory of the selected store
#[derive(Debug, Default)]
pub struct CatalogView {
    store_id: Option<String>,
    entries: Listing<CatalogEntry>,
    error: Option<PosError>,
    latest: LatestRequest,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load for `store_id`, superseding any load in flight.
    ///
    /// Entries of a different store are dropped immediately.
    pub fn begin(&mut self, store_id: &str) -> Ticket {
        if self.store_id.as_deref() != Some(store_id) {
            self.entries.replace_all(Vec::new());
            self.error = None;
            self.store_id = Some(store_id.to_string());
        }
        self.latest.begin()
    }

    pub fn apply(&mut self, ticket: Ticket, result: PosResult<Vec<CatalogEntry>>) -> ApplyOutcome {
        if !self.latest.is_current(ticket) {
            tracing::warn!(store_id = ?self.store_id, "Discarding stale inventory response");
            return ApplyOutcome::Stale;
        }
        match result {
            Ok(entries) => {
                let count = entries.len();
                self.entries.replace_all(entries);
                self.error = None;
                ApplyOutcome::Replaced(count)
            }
            Err(e) => {
                tracing::warn!(store_id = ?self.store_id, error = %e, "Inventory load failed");
                self.error = Some(e);
                ApplyOutcome::Failed
            }
        }
    }

    /// Reduce an entry's stock after a confirmed sale, until the next refetch
    pub fn record_sale(&mut self, product_id: &str, quantity: u32) -> RowUpdate {
        self.entries.apply_update(product_id, None, |entry| {
            entry.total_stock = (entry.total_stock - i64::from(quantity)).max(0);
        })
    }

    pub fn store_id(&self) -> Option<&str> {
        self.store_id.as_deref()
    }

    pub fn entries(&self) -> &Listing<CatalogEntry> {
        &self.entries
    }

    pub fn error(&self) -> Option<&PosError> {
        self.error.as_ref()
    }

    pub fn find(&self, product_id: &str) -> Option<&CatalogEntry> {
        self.entries.get(product_id)
    }

    pub fn visible(&self, filter: &CatalogFilter) -> Vec<&CatalogEntry> {
        filter.narrow(self.entries.items())
    }
}
