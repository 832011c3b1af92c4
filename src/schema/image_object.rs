//! ImageObject documents for listing photos

use chrono::Datelike;
use serde::Serialize;

use super::{non_blank, Organization, SchemaContext, SCHEMA_CONTEXT};
use crate::model::{ImageInput, VehicleRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageObjectDocument {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub url: String,
    pub content_url: String,
    pub caption: String,
    pub name: String,
    pub alternate_name: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub encoding_format: String,
    pub upload_date: String,
    pub creator: Organization,
    pub credit_text: String,
    pub copyright_notice: String,
    pub license: String,
    pub representative_of_page: bool,
    pub keywords: String,
}

/// Build an ImageObject for one car photo. Captions and keywords are derived
/// from the car's brand, title and year; missing parts are skipped.
pub fn build_image_object_jsonld(ctx: &SchemaContext<'_>, input: &ImageInput) -> ImageObjectDocument {
    let profile = ctx.profile;
    let brand = non_blank(input.car_brand.as_deref());
    let title = non_blank(input.car_title.as_deref());
    let year = input
        .car_year
        .as_ref()
        .map(|y| y.to_text())
        .and_then(|y| non_blank(Some(y.as_str())));

    let label = join_present(&[&brand, &title, &year], " ");
    let caption = non_blank(input.caption.as_deref());

    let url = profile.absolute_url(&input.url);
    let mut description = format!("รูปภาพ{}", join_present(&[&brand, &title], " "));
    if let Some(year) = &year {
        description.push_str(&format!(" ปี {year}"));
    }
    description.push_str(&format!(" จาก{} รถมือสอง{}", profile.name, profile.address.province));

    ImageObjectDocument {
        context: SCHEMA_CONTEXT,
        kind: "ImageObject",
        content_url: url.clone(),
        url,
        caption: caption
            .clone()
            .unwrap_or_else(|| format!("{label} ฟรีดาวน์ ผ่อนถูก").trim().to_string()),
        name: caption.clone().unwrap_or_else(|| label.clone()),
        alternate_name: non_blank(input.alt_text.as_deref())
            .or(caption)
            .unwrap_or(label),
        description,
        width: input.width,
        height: input.height,
        encoding_format: input.content_type.clone(),
        upload_date: non_blank(input.upload_date.as_deref()).unwrap_or_else(|| ctx.today()),
        creator: Organization {
            name: profile.name.clone(),
            url: Some(profile.base_url.clone()),
        },
        credit_text: format!("ภาพโดย {}", profile.name),
        copyright_notice: format!("© {} {}", ctx.now.year(), profile.name),
        license: profile.absolute_url("/terms-of-service"),
        representative_of_page: true,
        keywords: join_present(
            &[
                &brand,
                &title,
                &year,
                &Some("รถมือสอง".to_string()),
                &Some(profile.address.province.clone()),
                &Some(profile.name.clone()),
            ],
            ", ",
        ),
    }
}

/// One ImageObject per catalog photo of a car, in gallery order.
pub fn build_vehicle_image_objects(
    ctx: &SchemaContext<'_>,
    vehicle: &VehicleRecord,
) -> Vec<ImageObjectDocument> {
    vehicle
        .photo_inputs()
        .iter()
        .map(|photo| build_image_object_jsonld(ctx, photo))
        .collect()
}

fn join_present(parts: &[&Option<String>], sep: &str) -> String {
    parts
        .iter()
        .filter_map(|p| p.as_deref())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::LooseValue;
    use crate::profile::BusinessProfile;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn build(input: &ImageInput) -> Value {
        let profile = BusinessProfile::default();
        let ctx = SchemaContext::at(&profile, Utc.with_ymd_and_hms(2026, 5, 20, 3, 0, 0).unwrap());
        serde_json::to_value(build_image_object_jsonld(&ctx, input)).unwrap()
    }

    fn photo() -> ImageInput {
        ImageInput {
            url: "/cars/vios-front.jpg".to_string(),
            car_title: Some("Vios".to_string()),
            car_brand: Some("Toyota".to_string()),
            car_year: Some(LooseValue::Number(2019.0)),
            ..ImageInput::default()
        }
    }

    #[test]
    fn test_defaults() {
        let doc = build(&photo());
        assert_eq!(doc["@type"], "ImageObject");
        assert_eq!(doc["url"], "https://www.chiangmaiusedcar.com/cars/vios-front.jpg");
        assert_eq!(doc["contentUrl"], doc["url"]);
        assert_eq!(doc["width"], 1200);
        assert_eq!(doc["height"], 800);
        assert_eq!(doc["encodingFormat"], "image/jpeg");
        assert_eq!(doc["uploadDate"], "2026-05-20");
        assert_eq!(doc["caption"], "Toyota Vios 2019 ฟรีดาวน์ ผ่อนถูก");
        assert_eq!(doc["name"], "Toyota Vios 2019");
        assert_eq!(doc["alternateName"], "Toyota Vios 2019");
        assert_eq!(
            doc["description"],
            "รูปภาพToyota Vios ปี 2019 จากครูหนึ่งรถสวย รถมือสองเชียงใหม่"
        );
        assert_eq!(doc["copyrightNotice"], "© 2026 ครูหนึ่งรถสวย");
        assert_eq!(doc["license"], "https://www.chiangmaiusedcar.com/terms-of-service");
        assert_eq!(doc["creator"]["@type"], "Organization");
        assert_eq!(doc["representativeOfPage"], true);
        assert_eq!(
            doc["keywords"],
            "Toyota, Vios, 2019, รถมือสอง, เชียงใหม่, ครูหนึ่งรถสวย"
        );
    }

    #[test]
    fn test_explicit_values() {
        let input = ImageInput {
            caption: Some("Vios ด้านหน้า".to_string()),
            alt_text: Some("Toyota Vios สีขาว".to_string()),
            upload_date: Some("2026-01-02".to_string()),
            width: 1600,
            height: 900,
            content_type: "image/webp".to_string(),
            ..photo()
        };
        let doc = build(&input);
        assert_eq!(doc["caption"], "Vios ด้านหน้า");
        assert_eq!(doc["name"], "Vios ด้านหน้า");
        assert_eq!(doc["alternateName"], "Toyota Vios สีขาว");
        assert_eq!(doc["uploadDate"], "2026-01-02");
        assert_eq!(doc["width"], 1600);
        assert_eq!(doc["encodingFormat"], "image/webp");
    }

    #[test]
    fn test_vehicle_gallery_uses_photo_alt_text() {
        use crate::model::ImageDescriptor;

        let profile = BusinessProfile::default();
        let ctx = SchemaContext::at(&profile, Utc.with_ymd_and_hms(2026, 5, 20, 3, 0, 0).unwrap());
        let car = VehicleRecord {
            title: "Vios".to_string(),
            brand: Some("Toyota".to_string()),
            year: Some(LooseValue::Number(2019.0)),
            images: vec![
                ImageDescriptor {
                    url: "/cars/vios-front.jpg".to_string(),
                    alt_text: Some("Toyota Vios สีขาว ด้านหน้า".to_string()),
                },
                ImageDescriptor {
                    url: "/cars/vios-rear.jpg".to_string(),
                    alt_text: None,
                },
            ],
            ..VehicleRecord::default()
        };

        let docs = build_vehicle_image_objects(&ctx, &car);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].alternate_name, "Toyota Vios สีขาว ด้านหน้า");
        assert_eq!(docs[0].url, "https://www.chiangmaiusedcar.com/cars/vios-front.jpg");
        assert_eq!(docs[1].alternate_name, "Toyota Vios 2019");
        assert_eq!(docs[1].caption, "Toyota Vios 2019 ฟรีดาวน์ ผ่อนถูก");
    }

    #[test]
    fn test_missing_context_parts_skipped() {
        let input = ImageInput {
            url: "https://cdn.example.com/x.jpg".to_string(),
            car_title: Some("Jazz".to_string()),
            ..ImageInput::default()
        };
        let doc = build(&input);
        assert_eq!(doc["url"], "https://cdn.example.com/x.jpg");
        assert_eq!(doc["caption"], "Jazz ฟรีดาวน์ ผ่อนถูก");
        assert_eq!(doc["keywords"], "Jazz, รถมือสอง, เชียงใหม่, ครูหนึ่งรถสวย");
    }
}
