use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the customer paid at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Card => write!(f, "card"),
            Self::Upi => write!(f, "upi"),
        }
    }
}

/// Settlement state recorded with the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Paid,
    Pending,
}

/// One cart line as the order API expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProduct {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub name: String,
    /// Unit price × quantity
    pub total_price: Decimal,
    /// Weight in grams × quantity for weighed lines, plain quantity otherwise
    pub quantity_grams: Decimal,
    pub price_per_kg: Decimal,
}

/// Create POS order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosOrderRequest {
    pub store_id: String,
    pub customer_name: String,
    pub customer_number: String,
    pub selected_products: Vec<SelectedProduct>,
    pub sub_total: Decimal,
    /// Discount percent
    pub discount: Decimal,
    pub discount_amount: Decimal,
    /// Tax percent
    pub tax: Decimal,
    pub total_payable: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

/// Data returned when the backend accepts a POS order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosOrderReceipt {
    pub invoice_no: String,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_backend_field_names() {
        let req = PosOrderRequest {
            store_id: "s1".into(),
            customer_name: "Anu".into(),
            customer_number: "9800000000".into(),
            selected_products: vec![SelectedProduct {
                product_id: "p1".into(),
                variant_id: None,
                name: "Prawns".into(),
                total_price: Decimal::from(200),
                quantity_grams: Decimal::from(2),
                price_per_kg: Decimal::from(100),
            }],
            sub_total: Decimal::from(200),
            discount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            tax: Decimal::ZERO,
            total_payable: Decimal::from(200),
            payment_method: PaymentMethod::Upi,
            payment_status: PaymentStatus::Paid,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["customerNumber"], "9800000000");
        assert_eq!(value["subTotal"], 200.0);
        assert_eq!(value["totalPayable"], 200.0);
        assert_eq!(value["paymentMethod"], "upi");
        assert_eq!(value["selectedProducts"][0]["quantityGrams"], 2.0);
        assert!(value["selectedProducts"][0]["variantId"].is_null());
    }

    #[test]
    fn test_receipt_url_is_optional() {
        let receipt: PosOrderReceipt = serde_json::from_str(r#"{"invoiceNo":"INV-0042"}"#).unwrap();
        assert_eq!(receipt.invoice_no, "INV-0042");
        assert!(receipt.receipt_url.is_none());
    }
}
