//! Product / Offer documents

use serde::Serialize;

use super::car::{VehicleProperties, WarrantyPromise};
use super::review::{self, AggregateRating, Review};
use super::{
    non_blank, Brand, DefinedRegion, MerchantReturnPolicy, MonetaryAmount, Offer,
    QuantitativeValue, SchemaContext, Seller, ShippingDetails, SCHEMA_CONTEXT, USED_CONDITION,
};
use crate::availability::Availability;
use crate::model::{OfferInput, ProductInput};
use crate::price::{sanitize_price, LooseValue};

const UNLIMITED_RETURN_WINDOW: &str = "https://schema.org/MerchantReturnUnlimitedWindow";
const FREE_RETURN: &str = "https://schema.org/FreeReturn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProductKind {
    Product,
    Car,
}

/// Product-shaped document shared by the product and car builders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: ProductKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub image: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpn: Option<String>,
    #[serde(rename = "productID", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub vehicle: Option<VehicleProperties>,
    pub offers: Offer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty: Option<WarrantyPromise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_rating: Option<AggregateRating>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub review: Vec<Review>,
}

/// Build a Product document with a full Offer: dealer seller block, return
/// policy, shipping and an inventory level mirroring availability.
pub fn build_product_jsonld(ctx: &SchemaContext<'_>, input: &ProductInput) -> ProductDocument {
    let offer = build_offer(ctx, &input.offer);
    let blocks = review::gate(input.review.as_ref());

    ProductDocument {
        context: SCHEMA_CONTEXT,
        kind: ProductKind::Product,
        url: offer.url.clone(),
        name: input.name.clone(),
        description: non_blank(input.description.as_deref()),
        image: input
            .images
            .iter()
            .filter(|url| !url.is_empty())
            .map(|url| ctx.profile.absolute_url(url))
            .collect(),
        brand: Brand::named(input.brand.as_deref()),
        sku: non_blank(input.sku.as_deref()),
        mpn: non_blank(input.mpn.as_deref()),
        product_id: None,
        category: None,
        vehicle: None,
        offers: offer,
        warranty: None,
        aggregate_rating: blocks.aggregate_rating,
        review: blocks.reviews,
    }
}

fn build_offer(ctx: &SchemaContext<'_>, input: &OfferInput) -> Offer {
    let in_stock = input.is_in_stock();
    let price = sanitized_price(input.price.as_ref());
    let price_valid_until = price
        .as_ref()
        .map(|_| ctx.timestamp_after_days(input.price_valid_days));
    let country = ctx.profile.address.country.clone();

    Offer {
        url: non_blank(Some(input.url.as_str())).map(|url| ctx.profile.absolute_url(&url)),
        price_currency: input.currency.clone(),
        price,
        price_valid_until,
        availability: Availability::from_in_stock(in_stock).schema_url(),
        item_condition: Some(USED_CONDITION),
        inventory_level: Some(QuantitativeValue::inventory(in_stock)),
        seller: Some(Seller::from_profile(ctx.profile, input.seller_name.as_deref())),
        has_merchant_return_policy: Some(MerchantReturnPolicy {
            applicable_country: country.clone(),
            return_policy_category: UNLIMITED_RETURN_WINDOW.to_string(),
            merchant_return_days: Some(input.return_days),
            return_fees: Some(FREE_RETURN),
        }),
        shipping_details: Some(ShippingDetails {
            shipping_destination: DefinedRegion {
                address_country: country,
            },
            shipping_rate: input.free_ship.then(|| MonetaryAmount {
                value: LooseValue::Number(0.0),
                currency: input.currency.clone(),
            }),
        }),
    }
}

/// Sanitized price, logging a rejected raw value.
pub(crate) fn sanitized_price(raw: Option<&LooseValue>) -> Option<String> {
    let raw = raw?;
    let price = sanitize_price(raw);
    if price.is_none() {
        tracing::debug!(raw = %raw.to_text(), "unusable price, offer published without price");
    }
    price
}
