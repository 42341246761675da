//! Fisho POS - point-of-sale billing
//!
//! Resolve a store's sellable catalog, build a stock-bounded cart, price it
//! and submit it as an in-store order.
//!
//! # Modules
//!
//! - [`catalog`] - store/category/inventory resolution and narrowing
//! - [`cart`] - the cart engine
//! - [`pricing`] - discount and tax arithmetic
//! - [`checkout`] - order request building and submission state
//! - [`register`] - one billing session tying the above to notifications

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod guard;
pub mod listing;
pub mod logger;
pub mod pricing;
pub mod register;

pub use cart::{Cart, CartLine, LineId, QuantityChange};
pub use catalog::{CatalogFilter, CatalogResolver, CatalogView};
pub use checkout::{CheckoutForm, OrderSubmitter, SubmitState};
pub use config::PosConfig;
pub use error::{ErrorKind, PosError, PosResult, ValidationError};
pub use pricing::{PricingAdjustment, PricingSummary};
pub use register::{LogNotifier, Notification, NotificationLevel, Notifier, Register};
