//! Cart engine
//!
//! An ordered list of [`CartLine`]s, one per (product, variant, weight)
//! combination. Quantities stay within `1..=available_stock`; a line that
//! would reach zero is removed instead.

use std::fmt;

use rust_decimal::Decimal;
use shared::models::{CatalogEntry, VariantOffer, Weight};

use crate::error::ValidationError;

/// Composite line identity: product, optional variant, optional weight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineId(String);

impl LineId {
    /// Weights are keyed in grams so 0.5 kg and 500 g are the same line.
    pub fn compose(product_id: &str, variant_id: Option<&str>, weight: Option<&Weight>) -> Self {
        let mut id = product_id.to_string();
        if let Some(variant_id) = variant_id {
            id.push(':');
            id.push_str(variant_id);
        }
        if let Some(weight) = weight {
            id.push('@');
            id.push_str(&weight.in_grams().to_string());
            id.push('g');
        }
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the in-progress order
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: LineId,
    pub product_id: String,
    pub variant_id: Option<String>,
    pub name: String,
    pub variant_name: Option<String>,
    /// Selling price of the variant (per kg when weighed)
    pub base_price: Decimal,
    /// Price of one unit of this line
    pub unit_price: Decimal,
    pub quantity: u32,
    pub weight: Option<Weight>,
    /// Stock ceiling captured when the line was created
    pub available_stock: i64,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Outcome of [`Cart::change_quantity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Add one unit of `entry` (optionally a variant at a weight).
    ///
    /// An existing line is incremented unless that would exceed the entry's
    /// current `total_stock`, which becomes the line's new ceiling. A new
    /// line needs stock above zero and captures that stock as its ceiling.
    pub fn add_line(
        &mut self,
        entry: &CatalogEntry,
        variant: Option<&VariantOffer>,
        weight: Option<Weight>,
    ) -> Result<&CartLine, ValidationError> {
        if weight.is_some_and(|w| w.value <= Decimal::ZERO) {
            return Err(ValidationError::InvalidWeight);
        }

        let id = LineId::compose(&entry.id, variant.map(|v| v.id.as_str()), weight.as_ref());

        if let Some(pos) = self.lines.iter().position(|l| l.id == id) {
            let line = &mut self.lines[pos];
            let next = i64::from(line.quantity) + 1;
            if next > entry.total_stock {
                tracing::warn!(line = %id, stock = entry.total_stock, "Add rejected, stock ceiling reached");
                return Err(ValidationError::StockExceeded {
                    name: entry.name.clone(),
                    available: entry.total_stock,
                });
            }
            line.quantity += 1;
            line.available_stock = entry.total_stock;
            tracing::debug!(line = %id, quantity = line.quantity, "Incremented cart line");
            return Ok(&self.lines[pos]);
        }

        if !entry.in_stock() {
            return Err(ValidationError::OutOfStock {
                name: entry.name.clone(),
            });
        }

        let base_price = variant
            .map(|v| v.selling_price)
            .or(entry.selling_price)
            .ok_or_else(|| ValidationError::PriceUnavailable(entry.name.clone()))?;
        let unit_price = match &weight {
            Some(w) => base_price * w.in_kilograms(),
            None => base_price,
        };

        tracing::debug!(line = %id, %unit_price, stock = entry.total_stock, "Added cart line");
        self.lines.push(CartLine {
            id,
            product_id: entry.id.clone(),
            variant_id: variant.map(|v| v.id.clone()),
            name: entry.name.clone(),
            variant_name: variant.map(|v| v.name.clone()),
            base_price,
            unit_price,
            quantity: 1,
            weight,
            available_stock: entry.total_stock,
        });
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Move a line's quantity by `delta`, floored at zero.
    ///
    /// An increase past the captured ceiling is rejected and the line is
    /// untouched; decreases are always allowed. At exactly zero the line is
    /// removed.
    pub fn change_quantity(&mut self, id: &LineId, delta: i64) -> Result<QuantityChange, ValidationError> {
        let pos = self
            .lines
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| ValidationError::LineNotFound(id.to_string()))?;
        let line = &mut self.lines[pos];

        let next = (i64::from(line.quantity).saturating_add(delta)).max(0);
        if delta > 0 && next > line.available_stock {
            tracing::warn!(line = %id, requested = next, stock = line.available_stock, "Quantity change rejected");
            return Err(ValidationError::StockExceeded {
                name: line.name.clone(),
                available: line.available_stock,
            });
        }
        if next == 0 {
            self.lines.remove(pos);
            tracing::debug!(line = %id, "Removed cart line at zero quantity");
            return Ok(QuantityChange::Removed);
        }

        // bounded by the previous quantity or the i64 ceiling
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        line.quantity = next;
        Ok(QuantityChange::Updated(next))
    }

    /// Returns whether a line was removed
    pub fn remove_line(&mut self, id: &LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        before != self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
