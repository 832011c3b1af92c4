//! ItemList documents for catalog listing pages

use serde::Serialize;
use serde_json::Value;

use super::product::sanitized_price;
use super::{non_blank, Offer, QuantitativeValue, SCHEMA_CONTEXT, USED_CONDITION};
use crate::availability::{resolve_availability, Availability};
use crate::model::{ListingSummary, DEFAULT_CURRENCY};
use crate::profile::BusinessProfile;

const CAR_TYPE_URL: &str = "https://schema.org/Car";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "Product", rename_all = "camelCase")]
pub struct ListedProduct {
    pub additional_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<Offer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "ListItem")]
pub struct ListItem {
    pub position: usize,
    pub item: ListedProduct,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListDocument {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub number_of_items: usize,
    pub item_list_element: Vec<ListItem>,
}

/// Build an ItemList over catalog cards, positions 1..N in input order.
/// Card URLs and images are resolved against the profile's base URL.
///
/// Returns `None` for a missing or empty list: no document is better than
/// an empty `ItemList`.
pub fn build_item_list_jsonld(
    profile: &BusinessProfile,
    items: Option<&[ListingSummary]>,
) -> Option<ItemListDocument> {
    let items = match items {
        Some(items) if !items.is_empty() => items,
        _ => {
            tracing::debug!("no listings, ItemList omitted");
            return None;
        }
    };

    let item_list_element: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(index, summary)| ListItem {
            position: index + 1,
            item: listed_product(profile, summary),
        })
        .collect();

    Some(ItemListDocument {
        context: SCHEMA_CONTEXT,
        kind: "ItemList",
        number_of_items: item_list_element.len(),
        item_list_element,
    })
}

/// Same as `build_item_list_jsonld` for untyped page data. Anything other
/// than a JSON array yields `None`. Every object in the array becomes a card;
/// non-object entries are skipped.
pub fn item_list_from_value(profile: &BusinessProfile, value: &Value) -> Option<ItemListDocument> {
    let Value::Array(entries) = value else {
        tracing::debug!("listing data is not an array, ItemList omitted");
        return None;
    };

    let summaries: Vec<ListingSummary> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            match serde_json::from_value::<ListingSummary>(entry.clone()) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::debug!(index, error = %e, "skipping undecodable listing");
                    None
                }
            }
        })
        .collect();

    build_item_list_jsonld(profile, Some(summaries.as_slice()))
}

fn listed_product(profile: &BusinessProfile, summary: &ListingSummary) -> ListedProduct {
    let url = profile.absolute_url(summary.url.trim());
    let offers = sanitized_price(summary.price.as_ref()).map(|price| {
        let in_stock = resolve_availability(
            summary.availability,
            summary.status.as_deref(),
            summary.in_stock,
        );
        Offer {
            url: Some(url.clone()),
            price_currency: non_blank(summary.currency.as_deref())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            price: Some(price),
            price_valid_until: None,
            availability: Availability::from_in_stock(in_stock).schema_url(),
            item_condition: Some(USED_CONDITION),
            inventory_level: Some(QuantitativeValue::inventory(in_stock)),
            seller: None,
            has_merchant_return_policy: None,
            shipping_details: None,
        }
    });

    ListedProduct {
        additional_type: CAR_TYPE_URL,
        id: url.clone(),
        name: summary.name.clone(),
        image: non_blank(summary.image.as_deref()).map(|image| profile.absolute_url(&image)),
        url,
        offers,
    }
}
