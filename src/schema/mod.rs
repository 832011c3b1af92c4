//! schema.org JSON-LD document builders
//!
//! One module per output kind. Every builder is a pure function of its input,
//! the injected `BusinessProfile` and the clock reading carried by
//! `SchemaContext`. Optional properties are `Option` fields that are skipped
//! when absent, so a document never carries `null`.

mod car;
mod image_object;
mod item_list;
mod local_business;
mod product;
pub mod review;

pub use car::*;
pub use image_object::*;
pub use item_list::*;
pub use local_business::*;
pub use product::*;
pub use review::{AggregateRating, Person, Rating, Review, ReviewBlocks};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;

use crate::price::LooseValue;
use crate::profile::{BusinessAddress, BusinessProfile};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const USED_CONDITION: &str = "https://schema.org/UsedCondition";

/// Everything a builder reads besides its own input.
#[derive(Debug, Clone, Copy)]
pub struct SchemaContext<'a> {
    pub profile: &'a BusinessProfile,
    pub now: DateTime<Utc>,
}

impl<'a> SchemaContext<'a> {
    pub fn new(profile: &'a BusinessProfile) -> Self {
        Self::at(profile, Utc::now())
    }

    /// Context with a fixed clock reading.
    pub fn at(profile: &'a BusinessProfile, now: DateTime<Utc>) -> Self {
        Self { profile, now }
    }

    /// `now + days` as an RFC 3339 timestamp with milliseconds.
    pub fn timestamp_after_days(&self, days: i64) -> String {
        self.after_days(days)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// `now + days` as a `YYYY-MM-DD` date.
    pub fn date_after_days(&self, days: i64) -> String {
        self.after_days(days).format("%Y-%m-%d").to_string()
    }

    pub fn today(&self) -> String {
        self.now.format("%Y-%m-%d").to_string()
    }

    fn after_days(&self, days: i64) -> DateTime<Utc> {
        let shifted = Duration::try_days(days).and_then(|d| self.now.checked_add_signed(d));
        match shifted {
            Some(at) => at,
            None => {
                tracing::debug!(days, "validity window out of range, using default");
                self.now + Duration::days(crate::model::DEFAULT_PRICE_VALID_DAYS)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "PostalAddress", rename_all = "camelCase")]
pub struct PostalAddress {
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
}

impl From<&BusinessAddress> for PostalAddress {
    fn from(address: &BusinessAddress) -> Self {
        Self {
            street_address: address.street.clone(),
            address_locality: address.district.clone(),
            address_region: address.province.clone(),
            postal_code: address.postal_code.clone(),
            address_country: address.country.clone(),
        }
    }
}

/// The dealer as seller of an offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "AutoDealer")]
pub struct Seller {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
    pub telephone: String,
    pub address: PostalAddress,
}

impl Seller {
    pub fn from_profile(profile: &BusinessProfile, name_override: Option<&str>) -> Self {
        let name = name_override
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(profile.name.as_str());
        Self {
            id: profile.organization_id(),
            name: name.to_string(),
            url: profile.base_url.clone(),
            telephone: profile.e164_phone(),
            address: PostalAddress::from(&profile.address),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "Brand")]
pub struct Brand {
    pub name: String,
}

impl Brand {
    /// `None` for a blank brand.
    pub fn named(name: Option<&str>) -> Option<Self> {
        name.map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| Brand { name: n.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "Organization")]
pub struct Organization {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "QuantitativeValue", rename_all = "camelCase")]
pub struct QuantitativeValue {
    pub value: serde_json::Number,
    pub unit_code: &'static str,
}

impl QuantitativeValue {
    /// Stock count for a single used car: 1 when in stock, otherwise 0.
    pub fn inventory(in_stock: bool) -> Self {
        Self {
            value: serde_json::Number::from(u8::from(in_stock)),
            unit_code: "EA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "MonetaryAmount")]
pub struct MonetaryAmount {
    pub value: LooseValue,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "DefinedRegion", rename_all = "camelCase")]
pub struct DefinedRegion {
    pub address_country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "OfferShippingDetails", rename_all = "camelCase")]
pub struct ShippingDetails {
    pub shipping_destination: DefinedRegion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_rate: Option<MonetaryAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "MerchantReturnPolicy", rename_all = "camelCase")]
pub struct MerchantReturnPolicy {
    pub applicable_country: String,
    pub return_policy_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_return_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_fees: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "Offer", rename_all = "camelCase")]
pub struct Offer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub price_currency: String,
    /// Plain numeric string, present only for a valid price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_valid_until: Option<String>,
    pub availability: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_condition: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_level: Option<QuantitativeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<Seller>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_merchant_return_policy: Option<MerchantReturnPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_details: Option<ShippingDetails>,
}

/// Trimmed copy of an optional string, `None` when blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_context_dates() {
        let profile = BusinessProfile::default();
        let ctx = SchemaContext::at(&profile, fixed_now());
        assert_eq!(ctx.timestamp_after_days(90), "2026-04-01T08:30:00.000Z");
        assert_eq!(ctx.date_after_days(90), "2026-04-01");
        assert_eq!(ctx.today(), "2026-01-01");
        // out of range falls back to the default window
        assert_eq!(ctx.date_after_days(i64::MAX), "2026-04-01");
    }

    #[test]
    fn test_tagged_structs_serialize_type() {
        let brand = Brand::named(Some(" Toyota ")).unwrap();
        assert_eq!(
            serde_json::to_value(&brand).unwrap(),
            json!({"@type": "Brand", "name": "Toyota"})
        );
        assert!(Brand::named(Some("  ")).is_none());
    }

    #[test]
    fn test_seller_from_profile() {
        let profile = BusinessProfile::default();
        let seller = Seller::from_profile(&profile, None);
        let value = serde_json::to_value(&seller).unwrap();
        assert_eq!(value["@type"], "AutoDealer");
        assert_eq!(value["@id"], "https://www.chiangmaiusedcar.com/#organization");
        assert_eq!(value["telephone"], "+66940649018");
        assert_eq!(value["address"]["@type"], "PostalAddress");
        assert_eq!(value["address"]["postalCode"], "50210");

        let renamed = Seller::from_profile(&profile, Some("KN2Car"));
        assert_eq!(renamed.name, "KN2Car");
    }

    #[test]
    fn test_inventory_level() {
        assert_eq!(
            serde_json::to_value(QuantitativeValue::inventory(false)).unwrap(),
            json!({"@type": "QuantitativeValue", "value": 0, "unitCode": "EA"})
        );
    }
}
