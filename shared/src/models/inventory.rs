//! Store inventory models
//!
//! `GET /api/store-inventory/{storeId}` returns one [`CatalogEntry`] per
//! stocked product, each with its purchasable [`VariantOffer`]s.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::{default_true, Activatable};

/// A store's stocked product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Product id
    #[serde(alias = "_id", alias = "productId")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    /// Product-level price, used when no variant is chosen
    #[serde(default)]
    pub selling_price: Option<Decimal>,
    #[serde(default)]
    pub variants: Vec<VariantOffer>,
    /// Aggregate stock across variants, never negative
    #[serde(default, deserialize_with = "non_negative")]
    pub total_stock: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl CatalogEntry {
    pub fn in_stock(&self) -> bool {
        self.total_stock > 0
    }

    pub fn variant(&self, variant_id: &str) -> Option<&VariantOffer> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Case-insensitive substring match on the product name or any variant name.
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .variants
                .iter()
                .any(|v| v.name.to_lowercase().contains(needle))
    }
}

impl Activatable for CatalogEntry {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

/// One purchasable configuration (cut, weight option) of a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOffer {
    #[serde(alias = "_id", alias = "variantId")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Price shown struck-through on the card
    #[serde(default)]
    pub display_price: Decimal,
    /// Price actually charged; per kg when the line carries a weight
    #[serde(default)]
    pub selling_price: Decimal,
    /// Discount percent between display and selling price
    #[serde(default, alias = "discountPercent")]
    pub discount: Decimal,
    #[serde(default)]
    pub cut_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Activatable for VariantOffer {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

/// Weight unit of a weighed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    G,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kg => write!(f, "kg"),
            Self::G => write!(f, "g"),
        }
    }
}

/// A chosen weight, e.g. 500 g or 1.5 kg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weight {
    pub value: Decimal,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(value: Decimal, unit: WeightUnit) -> Self {
        Self { value, unit }
    }

    pub fn grams(value: Decimal) -> Self {
        Self::new(value, WeightUnit::G)
    }

    pub fn kilograms(value: Decimal) -> Self {
        Self::new(value, WeightUnit::Kg)
    }

    /// Weight in grams, trailing zeros removed
    pub fn in_grams(&self) -> Decimal {
        match self.unit {
            WeightUnit::Kg => self.value * Decimal::ONE_THOUSAND,
            WeightUnit::G => self.value,
        }
        .normalize()
    }

    pub fn in_kilograms(&self) -> Decimal {
        match self.unit {
            WeightUnit::Kg => self.value,
            WeightUnit::G => self.value / Decimal::ONE_THOUSAND,
        }
        .normalize()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.normalize(), self.unit)
    }
}

/// Whole units in stock. Fractional stock (weighed goods) is floored, since
/// a cart line only ever takes whole units.
fn non_negative<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map_or(0, |v| v.floor().max(0.0) as i64))
}
