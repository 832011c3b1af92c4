//! Input records handed over by page data loaders
//!
//! Field names follow the camelCase JSON the pages already assemble, and every
//! field is optional on the wire so partially filled catalog entries decode.

use serde::{Deserialize, Serialize};

use crate::availability::{resolve_availability, Availability};
use crate::price::LooseValue;

pub const DEFAULT_CURRENCY: &str = "THB";
pub const DEFAULT_PRICE_VALID_DAYS: i64 = 90;
pub const DEFAULT_RETURN_DAYS: u32 = 7;

/// Minimum length for a VIN to be published.
pub const MIN_VIN_LEN: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageDescriptor {
    pub url: String,
    pub alt_text: Option<String>,
}

/// A used car as described in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleRecord {
    pub title: String,
    pub description: Option<String>,
    #[serde(alias = "vendor")]
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient::loose")]
    pub year: Option<LooseValue>,
    pub vin: Option<String>,
    #[serde(deserialize_with = "lenient::loose")]
    pub mileage: Option<LooseValue>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub engine_size: Option<String>,
    #[serde(deserialize_with = "lenient::loose")]
    pub seats: Option<LooseValue>,
    pub color: Option<String>,
    pub body_type: Option<String>,
    pub images: Vec<ImageDescriptor>,
}

impl VehicleRecord {
    pub fn image_urls(&self) -> Vec<String> {
        self.images
            .iter()
            .filter(|img| !img.url.is_empty())
            .map(|img| img.url.clone())
            .collect()
    }

    /// One `ImageInput` per photo, carrying the car's identity for captions
    /// and the photo's own alt text.
    pub fn photo_inputs(&self) -> Vec<ImageInput> {
        self.images
            .iter()
            .filter(|img| !img.url.is_empty())
            .map(|img| ImageInput {
                url: img.url.clone(),
                alt_text: img.alt_text.clone(),
                car_title: Some(self.title.clone()).filter(|t| !t.trim().is_empty()),
                car_brand: self.brand.clone(),
                car_year: self.year.clone(),
                ..ImageInput::default()
            })
            .collect()
    }
}

/// Commercial terms for one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferInput {
    #[serde(deserialize_with = "lenient::loose")]
    pub price: Option<LooseValue>,
    pub currency: String,
    /// Canonical page URL, absolute or site-relative
    pub url: String,
    #[serde(deserialize_with = "lenient::availability")]
    pub availability: Option<Availability>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub in_stock: Option<bool>,
    pub price_valid_days: i64,
    /// Overrides the profile name on the seller block
    pub seller_name: Option<String>,
    pub return_days: u32,
    pub free_ship: bool,
}

impl Default for OfferInput {
    fn default() -> Self {
        Self {
            price: None,
            currency: DEFAULT_CURRENCY.to_string(),
            url: String::new(),
            availability: None,
            status: None,
            in_stock: None,
            price_valid_days: DEFAULT_PRICE_VALID_DAYS,
            seller_name: None,
            return_days: DEFAULT_RETURN_DAYS,
            free_ship: true,
        }
    }
}

impl OfferInput {
    pub fn is_in_stock(&self) -> bool {
        resolve_availability(self.availability, self.status.as_deref(), self.in_stock)
    }
}

/// Generic product page data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub mpn: Option<String>,
    #[serde(flatten)]
    pub offer: OfferInput,
    pub review: Option<ReviewSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewSummary {
    #[serde(deserialize_with = "lenient::loose")]
    pub rating_value: Option<LooseValue>,
    #[serde(deserialize_with = "lenient::loose")]
    pub review_count: Option<LooseValue>,
    pub reviews: Vec<ReviewEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewEntry {
    pub author: String,
    #[serde(deserialize_with = "lenient::loose")]
    pub rating: Option<LooseValue>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub date: Option<String>,
}

/// Return policy category, rendered as a schema.org enumeration URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnPolicyCategory {
    #[default]
    NoReturnRefund,
    MerchantReturnUnlimitedWindow,
    MerchantReturnFiniteReturnWindow,
    MerchantReturnNotPermitted,
}

impl ReturnPolicyCategory {
    pub fn schema_url(self) -> String {
        let name = match self {
            ReturnPolicyCategory::NoReturnRefund => "NoReturnRefund",
            ReturnPolicyCategory::MerchantReturnUnlimitedWindow => "MerchantReturnUnlimitedWindow",
            ReturnPolicyCategory::MerchantReturnFiniteReturnWindow => {
                "MerchantReturnFiniteReturnWindow"
            }
            ReturnPolicyCategory::MerchantReturnNotPermitted => "MerchantReturnNotPermitted",
        };
        format!("https://schema.org/{name}")
    }
}

/// Fully resolved car page data, used where the page already knows
/// availability and validity dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancedCarInput {
    #[serde(flatten)]
    pub vehicle: VehicleRecord,
    #[serde(deserialize_with = "lenient::loose")]
    pub price: Option<LooseValue>,
    pub currency: String,
    pub url: Option<String>,
    pub sku: Option<String>,
    #[serde(deserialize_with = "lenient::availability_or_in_stock")]
    pub availability: Availability,
    /// `YYYY-MM-DD`; defaults to 90 days from now
    pub price_valid_until: Option<String>,
    pub return_policy: ReturnPolicyCategory,
    pub shipping_cost: f64,
    pub warranty_period: String,
    pub review: Option<ReviewSummary>,
}

impl Default for EnhancedCarInput {
    fn default() -> Self {
        Self {
            vehicle: VehicleRecord::default(),
            price: None,
            currency: DEFAULT_CURRENCY.to_string(),
            url: None,
            sku: None,
            availability: Availability::InStock,
            price_valid_until: None,
            return_policy: ReturnPolicyCategory::default(),
            shipping_cost: 0.0,
            warranty_period: "1 ปี".to_string(),
            review: None,
        }
    }
}

/// Image metadata for an ImageObject document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageInput {
    pub url: String,
    pub caption: Option<String>,
    pub alt_text: Option<String>,
    pub car_title: Option<String>,
    pub car_brand: Option<String>,
    #[serde(deserialize_with = "lenient::loose")]
    pub car_year: Option<LooseValue>,
    /// `YYYY-MM-DD`; defaults to today
    pub upload_date: Option<String>,
    pub width: u32,
    pub height: u32,
    pub content_type: String,
}

impl Default for ImageInput {
    fn default() -> Self {
        Self {
            url: String::new(),
            caption: None,
            alt_text: None,
            car_title: None,
            car_brand: None,
            car_year: None,
            upload_date: None,
            width: 1200,
            height: 800,
            content_type: "image/jpeg".to_string(),
        }
    }
}

/// One catalog card on a listing page. Every field decodes leniently so any
/// JSON object becomes a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingSummary {
    #[serde(deserialize_with = "lenient::text_or_empty")]
    pub url: String,
    #[serde(deserialize_with = "lenient::text_or_empty")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient::loose")]
    pub price: Option<LooseValue>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient::availability")]
    pub availability: Option<Availability>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub in_stock: Option<bool>,
}

/// Field decoders for values the catalog does not type consistently. A value
/// of the wrong shape decodes as absent instead of failing the whole record.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::availability::Availability;
    use crate::price::LooseValue;

    pub fn availability<'de, D>(deserializer: D) -> Result<Option<Availability>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(raw) => {
                let parsed = Availability::parse(&raw);
                if parsed.is_none() {
                    tracing::debug!(%raw, "unknown availability signal ignored");
                }
                parsed
            }
            other => {
                tracing::debug!(raw = %other, "non-text availability signal ignored");
                None
            }
        })
    }

    pub fn availability_or_in_stock<'de, D>(deserializer: D) -> Result<Availability, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(availability(deserializer)?.unwrap_or(Availability::InStock))
    }

    /// `true`/`false`, `"true"`/`"false"` (any case), `1`/`0`.
    pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::Bool(b) => Some(b),
            Value::Number(n) => n.as_f64().map(|n| n != 0.0),
            Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => {
                    tracing::debug!(%raw, "unreadable flag ignored");
                    None
                }
            },
            other => {
                tracing::debug!(raw = %other, "unreadable flag ignored");
                None
            }
        })
    }

    pub fn loose<'de, D>(deserializer: D) -> Result<Option<LooseValue>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::Number(n) => n.as_f64().map(LooseValue::Number),
            Value::String(s) => Some(LooseValue::Text(s)),
            Value::Bool(b) => Some(LooseValue::Bool(b)),
            other => {
                tracing::debug!(raw = %other, "structured value where a scalar was expected");
                None
            }
        })
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => {
                tracing::debug!(raw = %other, "structured value where text was expected");
                None
            }
        })
    }

    pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.unwrap_or_default())
    }
}
