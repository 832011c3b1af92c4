//! Dealer identity used as seller/organization data in every document
//!
//! A `BusinessProfile` is plain configuration: it is loaded once (or taken
//! from `Default`) and passed to the builders, never mutated afterwards.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.chiangmaiusedcar.com";

/// Bare apex domain that is always rewritten to the `www.` host.
const APEX_HOST: &str = "chiangmaiusedcar.com";
const CANONICAL_HOST: &str = "www.chiangmaiusedcar.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    pub name: String,
    pub alternate_name: Option<String>,
    pub description: String,
    /// Local phone number as printed on the site (`094-064-9018`)
    pub phone: String,
    pub email: Option<String>,
    pub base_url: String,
    pub logo_path: String,
    pub address: BusinessAddress,
    pub coordinates: Coordinates,
    /// Radius of the served area around `coordinates`
    pub service_radius_km: f64,
    pub opening_hours: OpeningHours,
    pub social: SocialLinks,
    pub payment_accepted: Vec<String>,
    pub currencies_accepted: String,
    pub price_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessAddress {
    pub street: String,
    pub subdistrict: String,
    pub district: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Daily opening window, same every day of the week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    pub opens: String,
    pub closes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub facebook_personal: Option<String>,
    pub facebook_group: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub lemon8: Option<String>,
    pub line: Option<String>,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: "ครูหนึ่งรถสวย".to_string(),
            alternate_name: Some("KN2Car".to_string()),
            description: "รถมือสองเชียงใหม่ ศูนย์รวมรถบ้านคุณภาพดี ฟรีดาวน์ ผ่อนถูกที่สุด รับประกัน 1 ปี บริการสินเชื่อครบวงจร ส่งฟรีทั่วไทย".to_string(),
            phone: "094-064-9018".to_string(),
            email: Some("info@chiangmaiusedcar.com".to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
            logo_path: "/logo/logo_main.png".to_string(),
            address: BusinessAddress::default(),
            coordinates: Coordinates {
                latitude: 18.8049109,
                longitude: 99.0301679,
            },
            service_radius_km: 100.0,
            opening_hours: OpeningHours::default(),
            social: SocialLinks {
                facebook: Some("https://www.facebook.com/KN2car".to_string()),
                facebook_personal: Some("https://www.facebook.com/nuengblues".to_string()),
                facebook_group: Some("https://www.facebook.com/groups/kru.nueng.goodcar".to_string()),
                youtube: Some("https://youtube.com/@chiangraiusedcar".to_string()),
                tiktok: Some("https://www.tiktok.com/@krunueng_usedcar".to_string()),
                lemon8: Some("https://www.lemon8-app.com/@kn.goodcar?region=th".to_string()),
                line: Some("https://lin.ee/8ugfzstD".to_string()),
            },
            payment_accepted: ["Cash", "Credit Card", "Bank Transfer", "Financing"]
                .into_iter()
                .map(String::from)
                .collect(),
            currencies_accepted: "THB".to_string(),
            price_range: "฿฿".to_string(),
        }
    }
}

impl Default for BusinessAddress {
    fn default() -> Self {
        Self {
            street: "เลขที่ 324 หมู่ 2 ถนนสมโภชเชียงใหม่ 700 ปี".to_string(),
            subdistrict: "สันพระเนตร".to_string(),
            district: "สันทราย".to_string(),
            province: "เชียงใหม่".to_string(),
            postal_code: "50210".to_string(),
            country: "TH".to_string(),
        }
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            opens: "09:00".to_string(),
            closes: "20:00".to_string(),
        }
    }
}

impl OpeningHours {
    /// Compact schema.org form, e.g. `Mo-Su 09:00-20:00`
    pub fn compact(&self) -> String {
        format!("Mo-Su {}-{}", self.opens, self.closes)
    }
}

impl BusinessProfile {
    /// Load a profile from JSON. Missing fields keep their defaults and the
    /// base URL is normalized.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut profile: BusinessProfile = serde_json::from_str(json).map_err(Error::Config)?;
        profile.base_url = normalize_base_url(&profile.base_url)?;
        tracing::debug!(name = %profile.name, base_url = %profile.base_url, "loaded business profile");
        Ok(profile)
    }

    /// Resolve a site-relative path against the base URL. Absolute URLs pass
    /// through unchanged; protocol-relative ones (`//cdn...`) get `https:`.
    pub fn absolute_url(&self, path: &str) -> String {
        let lower = path.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with("//") {
            return format!("https:{path}");
        }
        if path.is_empty() {
            return self.base_url.clone();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// E.164 telephone: `094-064-9018` becomes `+66940649018`.
    pub fn e164_phone(&self) -> String {
        let digits: String = self.phone.chars().filter(char::is_ascii_digit).collect();
        if self.phone.trim_start().starts_with('+') {
            return format!("+{digits}");
        }
        let local = digits.strip_prefix('0').unwrap_or(&digits);
        format!("+66{local}")
    }

    /// Configured social profile URLs, unconfigured entries dropped.
    pub fn same_as(&self) -> Vec<String> {
        let s = &self.social;
        [
            &s.facebook,
            &s.youtube,
            &s.tiktok,
            &s.line,
            &s.lemon8,
            &s.facebook_personal,
            &s.facebook_group,
        ]
        .into_iter()
        .filter_map(|link| link.as_deref())
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(String::from)
        .collect()
    }

    pub fn organization_id(&self) -> String {
        format!("{}/#organization", self.base_url)
    }

    pub fn logo_url(&self) -> String {
        self.absolute_url(&self.logo_path)
    }
}

/// Canonical site origin: https only, `www.` host for the dealer domain, no
/// path/query/fragment and no trailing slash.
pub fn normalize_base_url(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    let candidate = if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let invalid = |source| Error::InvalidBaseUrl {
        input: input.to_string(),
        source,
    };

    let mut url = Url::parse(&candidate).map_err(invalid)?;
    if url.host_str() == Some(APEX_HOST) {
        url.set_host(Some(CANONICAL_HOST)).map_err(invalid)?;
    }
    // http -> https between special schemes cannot fail
    let _ = url.set_scheme("https");
    url.set_path("");
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("chiangmaiusedcar.com").unwrap(),
            "https://www.chiangmaiusedcar.com"
        );
        assert_eq!(
            normalize_base_url("http://example.com/cars?page=2#top").unwrap(),
            "https://example.com"
        );
        assert_eq!(normalize_base_url("").unwrap(), DEFAULT_BASE_URL);
        assert!(matches!(
            normalize_base_url("http://exa mple.com"),
            Err(Error::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_e164_phone() {
        let mut profile = BusinessProfile::default();
        assert_eq!(profile.e164_phone(), "+66940649018");

        profile.phone = "+66 94 064 9018".to_string();
        assert_eq!(profile.e164_phone(), "+66940649018");
    }

    #[test]
    fn test_absolute_url() {
        let profile = BusinessProfile::default();
        assert_eq!(
            profile.absolute_url("/car/x"),
            "https://www.chiangmaiusedcar.com/car/x"
        );
        assert_eq!(
            profile.absolute_url("car/x"),
            "https://www.chiangmaiusedcar.com/car/x"
        );
        assert_eq!(profile.absolute_url("https://cdn.example.com/a.jpg"), "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_absolute_url_protocol_relative() {
        let profile = BusinessProfile::default();
        assert_eq!(
            profile.absolute_url("//cdn.shopify.com/s/files/vios.jpg"),
            "https://cdn.shopify.com/s/files/vios.jpg"
        );
        assert_eq!(profile.absolute_url(""), "https://www.chiangmaiusedcar.com");
    }

    #[test]
    fn test_same_as_drops_unconfigured() {
        let mut profile = BusinessProfile::default();
        profile.social = SocialLinks {
            facebook: Some("https://www.facebook.com/KN2car".to_string()),
            youtube: Some(String::new()),
            tiktok: None,
            line: Some("https://lin.ee/x".to_string()),
            ..SocialLinks::default()
        };
        assert_eq!(
            profile.same_as(),
            vec!["https://www.facebook.com/KN2car", "https://lin.ee/x"]
        );
    }

    #[test]
    fn test_from_json_str_fills_defaults() {
        let profile =
            BusinessProfile::from_json_str(r#"{"name": "Test Motors", "baseUrl": "test.example/"}"#)
                .unwrap();
        assert_eq!(profile.name, "Test Motors");
        assert_eq!(profile.base_url, "https://test.example");
        assert_eq!(profile.address.postal_code, "50210");
        assert_eq!(profile.opening_hours.compact(), "Mo-Su 09:00-20:00");
    }

    #[test]
    fn test_from_json_str_rejects_malformed() {
        assert!(matches!(
            BusinessProfile::from_json_str("{not json"),
            Err(Error::Config(_))
        ));
    }
}
