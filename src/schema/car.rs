//! Car documents
//!
//! `build_car_jsonld` specializes the product document for vehicle rich
//! results. `build_enhanced_car_jsonld` takes fully resolved page data
//! (explicit availability, validity date, warranty, return policy).

use serde::Serialize;

use super::product::{build_product_jsonld, sanitized_price, ProductDocument, ProductKind};
use super::review;
use super::{
    non_blank, Brand, DefinedRegion, MerchantReturnPolicy, MonetaryAmount, Offer,
    QuantitativeValue, SchemaContext, Seller, ShippingDetails, SCHEMA_CONTEXT, USED_CONDITION,
};
use crate::model::{
    EnhancedCarInput, OfferInput, ProductInput, ReviewSummary, VehicleRecord,
    DEFAULT_PRICE_VALID_DAYS, MIN_VIN_LEN,
};
use crate::price::{json_number, loose_number, parse_leading_int, LooseValue};

const DEFAULT_FUEL_TYPE: &str = "Gasoline";
const WARRANTY_SCOPE: &str = "เครื่องยนต์และเกียร์";
const USED_CAR_CATEGORY: &str = "รถยนต์มือสอง";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "EngineSpecification", rename_all = "camelCase")]
pub struct EngineSpecification {
    pub engine_displacement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "WarrantyPromise", rename_all = "camelCase")]
pub struct WarrantyPromise {
    pub duration_of_warranty: String,
    pub warranty_scope: String,
}

/// Vehicle-specific properties merged into a Car document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_model_date: Option<LooseValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_engine: Option<EngineSpecification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage_from_odometer: Option<QuantitativeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_identification_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
}

impl VehicleProperties {
    /// Vehicle properties with every unusable value left out.
    pub fn from_record(vehicle: &VehicleRecord, default_fuel: Option<&str>) -> Self {
        let fuel_type = non_blank(vehicle.fuel_type.as_deref()).or_else(|| default_fuel.map(String::from));

        VehicleProperties {
            model: non_blank(vehicle.model.as_deref()),
            vehicle_model_date: vehicle.year.clone().filter(LooseValue::is_truthy),
            vehicle_transmission: non_blank(vehicle.transmission.as_deref()),
            vehicle_engine: non_blank(vehicle.engine_size.as_deref()).map(|size| {
                EngineSpecification {
                    engine_displacement: size,
                    fuel_type: fuel_type.clone(),
                }
            }),
            fuel_type,
            mileage_from_odometer: vehicle.mileage.as_ref().and_then(mileage_km),
            vehicle_identification_number: vehicle.vin.as_deref().and_then(valid_vin),
            number_of_seats: vehicle.seats.as_ref().and_then(seat_count),
            color: non_blank(vehicle.color.as_deref()),
            body_type: non_blank(vehicle.body_type.as_deref()),
        }
    }
}

fn mileage_km(raw: &LooseValue) -> Option<QuantitativeValue> {
    match loose_number(raw).filter(|km| km.is_finite() && *km >= 0.0).and_then(json_number) {
        Some(value) => Some(QuantitativeValue {
            value,
            unit_code: "KMT",
        }),
        None => {
            tracing::debug!(raw = %raw.to_text(), "unparseable mileage, mileageFromOdometer omitted");
            None
        }
    }
}

fn valid_vin(vin: &str) -> Option<String> {
    let vin = vin.trim();
    if vin.chars().count() >= MIN_VIN_LEN {
        Some(vin.to_string())
    } else {
        if !vin.is_empty() {
            tracing::debug!(len = vin.chars().count(), "VIN too short, vehicleIdentificationNumber omitted");
        }
        None
    }
}

fn seat_count(raw: &LooseValue) -> Option<u32> {
    let seats = parse_leading_int(raw)
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok());
    if seats.is_none() {
        tracing::debug!(raw = %raw.to_text(), "invalid seat count, numberOfSeats omitted");
    }
    seats
}

/// Build a Car document: the product document re-typed as `Car` with the
/// vehicle's properties attached.
pub fn build_car_jsonld(
    ctx: &SchemaContext<'_>,
    vehicle: &VehicleRecord,
    offer: &OfferInput,
    review: Option<&ReviewSummary>,
) -> ProductDocument {
    let product = ProductInput {
        name: vehicle.title.clone(),
        description: vehicle.description.clone(),
        images: vehicle.image_urls(),
        brand: vehicle.brand.clone(),
        sku: None,
        mpn: None,
        offer: offer.clone(),
        review: review.cloned(),
    };

    let mut doc = build_product_jsonld(ctx, &product);
    doc.kind = ProductKind::Car;
    doc.category = Some("Automotive".to_string());
    doc.vehicle = Some(VehicleProperties::from_record(vehicle, None));
    doc
}

/// `brand-model-year` from the parts that are present, else the last segment
/// of the listing URL.
fn derived_sku(parts: &[&str], url: Option<&str>) -> Option<String> {
    let present: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    if !present.is_empty() {
        return Some(present.join("-"));
    }
    let slug = url?
        .split(['?', '#'])
        .next()?
        .trim_end_matches('/')
        .rsplit('/')
        .next()?;
    let sku = non_blank(Some(slug));
    if sku.is_none() {
        tracing::debug!("no brand, model, year or URL slug, sku omitted");
    }
    sku
}

/// Build a Car document from fully resolved page data.
pub fn build_enhanced_car_jsonld(ctx: &SchemaContext<'_>, input: &EnhancedCarInput) -> ProductDocument {
    let vehicle = &input.vehicle;
    let profile = ctx.profile;

    let brand = vehicle.brand.as_deref().unwrap_or_default().trim();
    let model = vehicle.model.as_deref().unwrap_or_default().trim();
    let year = vehicle.year.as_ref().map(LooseValue::to_text).unwrap_or_default();

    let explicit_sku = non_blank(input.sku.as_deref());
    let sku = explicit_sku
        .clone()
        .or_else(|| derived_sku(&[brand, model, year.trim()], input.url.as_deref()));
    let mpn = non_blank(Some(format!("{brand}{model}{year}").as_str()));

    let price = sanitized_price(input.price.as_ref());
    let price_valid_until = price.as_ref().map(|_| {
        non_blank(input.price_valid_until.as_deref())
            .unwrap_or_else(|| ctx.date_after_days(DEFAULT_PRICE_VALID_DAYS))
    });
    let in_stock = input.availability.is_in_stock();
    let country = profile.address.country.clone();

    let offers = Offer {
        url: Some(match non_blank(input.url.as_deref()) {
            Some(url) => profile.absolute_url(&url),
            None => profile.base_url.clone(),
        }),
        price_currency: input.currency.clone(),
        price,
        price_valid_until,
        availability: input.availability.schema_url(),
        item_condition: Some(USED_CONDITION),
        inventory_level: Some(QuantitativeValue::inventory(in_stock)),
        seller: Some(Seller::from_profile(profile, None)),
        has_merchant_return_policy: Some(MerchantReturnPolicy {
            applicable_country: country.clone(),
            return_policy_category: input.return_policy.schema_url(),
            merchant_return_days: None,
            return_fees: None,
        }),
        shipping_details: Some(ShippingDetails {
            shipping_destination: DefinedRegion {
                address_country: country,
            },
            shipping_rate: Some(MonetaryAmount {
                value: LooseValue::Text(LooseValue::Number(input.shipping_cost).to_text()),
                currency: input.currency.clone(),
            }),
        }),
    };

    let blocks = review::gate(input.review.as_ref());

    ProductDocument {
        context: SCHEMA_CONTEXT,
        kind: ProductKind::Car,
        url: offers.url.clone(),
        name: vehicle.title.clone(),
        description: non_blank(vehicle.description.as_deref()),
        image: vehicle
            .image_urls()
            .iter()
            .map(|url| profile.absolute_url(url))
            .collect(),
        brand: Brand::named(vehicle.brand.as_deref()),
        sku,
        mpn,
        product_id: explicit_sku,
        category: Some(USED_CAR_CATEGORY.to_string()),
        vehicle: Some(VehicleProperties::from_record(vehicle, Some(DEFAULT_FUEL_TYPE))),
        offers,
        warranty: Some(WarrantyPromise {
            duration_of_warranty: input.warranty_period.clone(),
            warranty_scope: WARRANTY_SCOPE.to_string(),
        }),
        aggregate_rating: blocks.aggregate_rating,
        review: blocks.reviews,
    }
}
