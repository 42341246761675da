//! POS register
//!
//! Owns one billing session: the catalog view of the selected store, the
//! cart, the checkout form and the submitter. Every operation here is a user
//! action; failures end up as a [`Notification`] and are not returned as
//! errors.

use fisho_client::{FishoApi, HttpClient};
use rust_decimal::Decimal;
use shared::models::{Category, Store, Weight};
use shared::order::{PaymentMethod, PaymentStatus, PosOrderReceipt};

use crate::cart::{Cart, LineId, QuantityChange};
use crate::catalog::{ApplyOutcome, CatalogFilter, CatalogResolver, CatalogView};
use crate::checkout::{CheckoutForm, OrderSubmitter, SubmitState};
use crate::error::{PosError, ValidationError};
use crate::listing::Listing;
use crate::pricing::{self, PricingSummary, percent_from_f64};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    /// Validation problems are warnings, everything else an error
    pub fn from_error(err: &PosError) -> Self {
        match err {
            PosError::Validation(_) => Self::warning(err.user_message()),
            PosError::Fetch(_) => Self::error(err.user_message()),
        }
    }
}

/// Where the register reports outcomes
pub trait Notifier {
    fn notify(&self, notification: Notification);

    /// Show the printable receipt of a created order
    fn open_receipt(&self, url: &str);
}

/// Notifier that writes to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!("{}", notification.message),
            NotificationLevel::Warning => tracing::warn!("{}", notification.message),
            NotificationLevel::Error => tracing::error!("{}", notification.message),
        }
    }

    fn open_receipt(&self, url: &str) {
        tracing::info!(url, "Receipt available");
    }
}

pub struct Register<C, N> {
    api: FishoApi<C>,
    notifier: N,
    stores: Listing<Store>,
    categories: Listing<Category>,
    catalog: CatalogView,
    filter: CatalogFilter,
    cart: Cart,
    form: CheckoutForm,
    submitter: OrderSubmitter,
}

impl<C: HttpClient, N: Notifier> Register<C, N> {
    pub fn new(api: FishoApi<C>, notifier: N) -> Self {
        Self {
            api,
            notifier,
            stores: Listing::new(),
            categories: Listing::new(),
            catalog: CatalogView::new(),
            filter: CatalogFilter::default(),
            cart: Cart::new(),
            form: CheckoutForm::default(),
            submitter: OrderSubmitter::new(),
        }
    }

    fn report(&self, err: &PosError) {
        self.notifier.notify(Notification::from_error(err));
    }

    // ========== Accessors ==========

    pub fn api(&self) -> &FishoApi<C> {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn stores(&self) -> &Listing<Store> {
        &self.stores
    }

    pub fn categories(&self) -> &Listing<Category> {
        &self.categories
    }

    pub fn catalog(&self) -> &CatalogView {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn submit_state(&self) -> &SubmitState {
        self.submitter.state()
    }

    // ========== Catalog ==========

    /// Refresh the store list; on failure the previous list stays
    pub async fn load_stores(&mut self) -> bool {
        match CatalogResolver::new(&self.api).stores().await {
            Ok(stores) => {
                self.stores.replace_all(stores);
                true
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Select a store and load its categories and inventory.
    ///
    /// Switching to a different store empties the cart, since its lines
    /// were priced and stock-checked against the old store.
    pub async fn select_store(&mut self, store_id: &str) -> bool {
        if self.form.store_id.as_deref() != Some(store_id) {
            if !self.cart.is_empty() {
                tracing::info!(from = ?self.form.store_id, to = store_id, "Store changed, clearing cart");
                self.cart.clear();
            }
            self.form.store_id = Some(store_id.to_string());
            self.filter.category_id = None;
        }
        self.load_categories().await;
        self.load_catalog().await
    }

    pub async fn load_categories(&mut self) -> bool {
        let store_id = self.form.store_id.clone();
        match CatalogResolver::new(&self.api).categories(store_id.as_deref()).await {
            Ok(categories) => {
                self.categories.replace_all(categories);
                true
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Re-fetch the selected store's inventory
    pub async fn load_catalog(&mut self) -> bool {
        let Some(store_id) = self.form.store_id.clone() else {
            self.report(&ValidationError::StoreNotSelected.into());
            return false;
        };
        let ticket = self.catalog.begin(&store_id);
        let result = CatalogResolver::new(&self.api).inventory(&store_id).await;
        match self.catalog.apply(ticket, result) {
            ApplyOutcome::Replaced(_) => true,
            ApplyOutcome::Stale => false,
            ApplyOutcome::Failed => {
                if let Some(e) = self.catalog.error() {
                    self.report(e);
                }
                false
            }
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub fn set_category(&mut self, category_id: Option<String>) {
        self.filter.category_id = category_id;
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// Catalog entries under the current category and search term
    pub fn visible_entries(&self) -> Vec<&shared::models::CatalogEntry> {
        self.catalog.visible(&self.filter)
    }

    // ========== Cart ==========

    fn try_add(
        &mut self,
        product_id: &str,
        variant_id: Option<&str>,
        weight: Option<Weight>,
    ) -> Result<LineId, ValidationError> {
        let entry = self
            .catalog
            .find(product_id)
            .ok_or_else(|| ValidationError::UnknownProduct(product_id.to_string()))?;
        let variant = match variant_id {
            Some(id) => Some(
                entry
                    .variant(id)
                    .ok_or_else(|| ValidationError::UnknownVariant(id.to_string()))?,
            ),
            None => None,
        };
        self.cart
            .add_line(entry, variant, weight)
            .map(|line| line.id.clone())
    }

    /// Add one unit of a catalog entry; `None` when rejected
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        variant_id: Option<&str>,
        weight: Option<Weight>,
    ) -> Option<LineId> {
        match self.try_add(product_id, variant_id, weight) {
            Ok(id) => Some(id),
            Err(e) => {
                self.report(&e.into());
                None
            }
        }
    }

    pub fn change_quantity(&mut self, id: &LineId, delta: i64) -> Option<QuantityChange> {
        match self.cart.change_quantity(id, delta) {
            Ok(change) => Some(change),
            Err(e) => {
                self.report(&e.into());
                None
            }
        }
    }

    pub fn remove_line(&mut self, id: &LineId) -> bool {
        self.cart.remove_line(id)
    }

    /// Empty the cart and reset customer fields and percentages
    pub fn clear(&mut self) {
        self.cart.clear();
        self.form.reset_customer();
    }

    // ========== Checkout form ==========

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.form.customer_name = name.into();
    }

    pub fn set_customer_phone(&mut self, phone: impl Into<String>) {
        self.form.customer_phone = phone.into();
    }

    /// Raw input; clamped to `[0, 100]`, non-numbers become 0
    pub fn set_discount_percent(&mut self, value: f64) {
        self.form.adjustment.set_discount_percent(percent_from_f64(value));
    }

    pub fn set_tax_percent(&mut self, value: f64) {
        self.form.adjustment.set_tax_percent(percent_from_f64(value));
    }

    pub fn set_discount(&mut self, value: Decimal) {
        self.form.adjustment.set_discount_percent(value);
    }

    pub fn set_tax(&mut self, value: Decimal) {
        self.form.adjustment.set_tax_percent(value);
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.form.payment_method = method;
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.form.payment_status = status;
    }

    pub fn pricing(&self) -> PricingSummary {
        pricing::summarize(&self.cart, &self.form.adjustment)
    }

    // ========== Submit ==========

    /// Submit the cart as an in-store order.
    ///
    /// On success the cart and customer fields are reset and the sold stock is
    /// deducted locally until the next catalog load. On failure nothing
    /// changes.
    pub async fn submit(&mut self) -> Option<PosOrderReceipt> {
        let result = self.submitter.submit(&self.api, &self.form, &self.cart).await;
        let outcome = match result {
            Ok(receipt) => {
                let sold: Vec<(String, u32)> = self
                    .cart
                    .lines()
                    .iter()
                    .map(|l| (l.product_id.clone(), l.quantity))
                    .collect();
                for (product_id, quantity) in &sold {
                    self.catalog.record_sale(product_id, *quantity);
                }
                self.clear();

                self.notifier.notify(Notification::success(format!(
                    "Order placed successfully. Invoice: {}",
                    receipt.invoice_no
                )));
                if let Some(url) = receipt.receipt_url.as_deref() {
                    self.notifier.open_receipt(url);
                }
                Some(receipt)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        };
        self.submitter.acknowledge();
        outcome
    }
}
