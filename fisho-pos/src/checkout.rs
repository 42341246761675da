//! Order submitter
//!
//! Turns the cart and checkout form into a [`PosOrderRequest`] and tracks
//! one submission through `Idle -> Submitting -> Succeeded | Failed`. The
//! submitter never mutates the cart; resetting after success is the
//! register's job.

use fisho_client::{FishoApi, HttpClient};
use rust_decimal::Decimal;
use shared::order::{PaymentMethod, PaymentStatus, PosOrderReceipt, PosOrderRequest, SelectedProduct};

use crate::cart::{Cart, CartLine};
use crate::error::{PosResult, ValidationError};
use crate::pricing::{self, PricingAdjustment, round_money};

/// Customer, store and payment fields entered alongside the cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    pub store_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub adjustment: PricingAdjustment,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

impl CheckoutForm {
    /// Clear customer fields and percentages; store and payment choices stay
    pub fn reset_customer(&mut self) {
        self.customer_name.clear();
        self.customer_phone.clear();
        self.adjustment = PricingAdjustment::none();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded(PosOrderReceipt),
    Failed(String),
}

/// Checks run before any request, first failure wins
pub fn check_preconditions<'f>(form: &'f CheckoutForm, cart: &Cart) -> Result<&'f str, ValidationError> {
    let store_id = form
        .store_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or(ValidationError::StoreNotSelected)?;
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    if form.customer_name.trim().is_empty() {
        return Err(ValidationError::MissingCustomerName);
    }
    if form.customer_phone.trim().is_empty() {
        return Err(ValidationError::MissingCustomerPhone);
    }
    Ok(store_id)
}

fn selected_product(line: &CartLine) -> SelectedProduct {
    let quantity = Decimal::from(line.quantity);
    let (quantity_grams, price_per_kg) = match &line.weight {
        Some(weight) => (weight.in_grams() * quantity, line.base_price),
        None => (quantity, line.unit_price),
    };
    let name = match &line.variant_name {
        Some(variant) => format!("{} ({})", line.name, variant),
        None => line.name.clone(),
    };
    SelectedProduct {
        product_id: line.product_id.clone(),
        variant_id: line.variant_id.clone(),
        name,
        total_price: round_money(line.line_total()),
        quantity_grams,
        price_per_kg: round_money(price_per_kg),
    }
}

/// Build a fresh order request; money is rounded here and nowhere earlier
pub fn build_submission(form: &CheckoutForm, cart: &Cart) -> Result<PosOrderRequest, ValidationError> {
    let store_id = check_preconditions(form, cart)?;
    let summary = pricing::summarize(cart, &form.adjustment);
    Ok(PosOrderRequest {
        store_id: store_id.to_string(),
        customer_name: form.customer_name.trim().to_string(),
        customer_number: form.customer_phone.trim().to_string(),
        selected_products: cart.lines().iter().map(selected_product).collect(),
        sub_total: round_money(summary.subtotal),
        discount: form.adjustment.discount_percent(),
        discount_amount: round_money(summary.discount_amount),
        tax: form.adjustment.tax_percent(),
        total_payable: round_money(summary.grand_total),
        payment_method: form.payment_method,
        payment_status: form.payment_status,
    })
}

#[derive(Debug, Default)]
pub struct OrderSubmitter {
    state: SubmitState,
}

impl OrderSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SubmitState::Idle
    }

    /// Submit once. Rejected without a request unless idle and all
    /// preconditions hold; those rejections leave the state untouched.
    pub async fn submit<C: HttpClient>(
        &mut self,
        api: &FishoApi<C>,
        form: &CheckoutForm,
        cart: &Cart,
    ) -> PosResult<PosOrderReceipt> {
        if !self.is_idle() {
            return Err(ValidationError::SubmissionInProgress.into());
        }
        let request = build_submission(form, cart)?;

        self.state = SubmitState::Submitting;
        tracing::info!(
            store_id = %request.store_id,
            lines = request.selected_products.len(),
            total = %request.total_payable,
            method = %request.payment_method,
            "Submitting POS order"
        );

        match api.create_pos_order(&request).await {
            Ok(receipt) => {
                tracing::info!(invoice_no = %receipt.invoice_no, "POS order created");
                self.state = SubmitState::Succeeded(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!(error = %e, status = ?e.status(), "POS order failed");
                self.state = SubmitState::Failed(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Return to idle after the outcome has been shown
    pub fn acknowledge(&mut self) {
        self.state = SubmitState::Idle;
    }
}
