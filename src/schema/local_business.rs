//! AutoDealer (LocalBusiness) document for the dealership itself

use serde::Serialize;

use super::{PostalAddress, SCHEMA_CONTEXT};
use crate::profile::BusinessProfile;

const ALL_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "GeoCoordinates")]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "OpeningHoursSpecification", rename_all = "camelCase")]
pub struct OpeningHoursSpecification {
    pub day_of_week: Vec<&'static str>,
    pub opens: String,
    pub closes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type")]
pub enum AreaServed {
    #[serde(rename_all = "camelCase")]
    GeoCircle {
        geo_midpoint: GeoCoordinates,
        /// metres
        geo_radius: String,
    },
    AdministrativeArea { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalBusinessDocument {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
    pub description: String,
    pub url: String,
    pub logo: String,
    pub telephone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: PostalAddress,
    pub geo: GeoCoordinates,
    pub opening_hours: String,
    pub opening_hours_specification: Vec<OpeningHoursSpecification>,
    pub price_range: String,
    pub payment_accepted: Vec<String>,
    pub currencies_accepted: String,
    pub area_served: Vec<AreaServed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

/// Build the dealership's AutoDealer document. It never carries
/// `aggregateRating`; there is no first-party review data for the business.
pub fn build_local_business_jsonld(profile: &BusinessProfile) -> LocalBusinessDocument {
    let geo = GeoCoordinates {
        latitude: profile.coordinates.latitude,
        longitude: profile.coordinates.longitude,
    };
    let radius_m = (profile.service_radius_km * 1000.0).round().max(0.0) as u64;

    LocalBusinessDocument {
        context: SCHEMA_CONTEXT,
        kind: "AutoDealer",
        id: profile.organization_id(),
        name: profile.name.clone(),
        alternate_name: profile.alternate_name.clone().filter(|n| !n.is_empty()),
        description: profile.description.clone(),
        url: profile.base_url.clone(),
        logo: profile.logo_url(),
        telephone: profile.e164_phone(),
        email: profile.email.clone().filter(|e| !e.is_empty()),
        address: PostalAddress::from(&profile.address),
        geo: geo.clone(),
        opening_hours: profile.opening_hours.compact(),
        opening_hours_specification: vec![OpeningHoursSpecification {
            day_of_week: ALL_WEEK.to_vec(),
            opens: profile.opening_hours.opens.clone(),
            closes: profile.opening_hours.closes.clone(),
        }],
        price_range: profile.price_range.clone(),
        payment_accepted: profile.payment_accepted.clone(),
        currencies_accepted: profile.currencies_accepted.clone(),
        area_served: vec![
            AreaServed::GeoCircle {
                geo_midpoint: geo,
                geo_radius: radius_m.to_string(),
            },
            AreaServed::AdministrativeArea {
                name: profile.address.province.clone(),
            },
        ],
        same_as: profile.same_as(),
    }
}
