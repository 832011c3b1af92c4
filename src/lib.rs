//! schema.org JSON-LD generation for a used-car dealership website
//!
//! Builds typed structured-data documents from loosely-typed page data:
//! - Product / Car / enhanced Car with Offer, seller, return and shipping blocks
//! - AutoDealer (LocalBusiness) from a configurable business profile
//! - ImageObject for listing photos
//! - ItemList for catalog pages
//! - Script-tag embedding for page heads
//!
//! Every builder is pure given a `SchemaContext` (profile + clock).

pub mod availability;
pub mod embed;
pub mod error;
pub mod model;
pub mod price;
pub mod profile;
pub mod schema;

pub use availability::{resolve_availability, Availability};
pub use embed::to_script_tag;
pub use error::{Error, Result};
pub use price::{sanitize_price, LooseValue};
pub use profile::BusinessProfile;
pub use schema::{
    build_car_jsonld, build_enhanced_car_jsonld, build_image_object_jsonld,
    build_item_list_jsonld, build_local_business_jsonld, build_product_jsonld,
    build_vehicle_image_objects, item_list_from_value, SchemaContext,
};
