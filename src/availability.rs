//! Stock state from competing availability signals
//!
//! The catalog API, the admin toggle and the free-text status field can each
//! claim a listing's availability. The most explicit signal wins; silence
//! means available.

use serde::{Deserialize, Serialize};

/// Explicit availability as stored on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    InStock,
    OutOfStock,
}

impl Availability {
    pub fn from_in_stock(in_stock: bool) -> Self {
        if in_stock {
            Availability::InStock
        } else {
            Availability::OutOfStock
        }
    }

    /// Read a free-form availability signal: `InStock`, `in_stock`,
    /// `https://schema.org/OutOfStock` and so on. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim().rsplit('/').next().unwrap_or_default();
        let name: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if name.eq_ignore_ascii_case("instock") {
            Some(Availability::InStock)
        } else if name.eq_ignore_ascii_case("outofstock") {
            Some(Availability::OutOfStock)
        } else {
            None
        }
    }

    pub fn is_in_stock(self) -> bool {
        self == Availability::InStock
    }

    /// Full schema.org enumeration URL.
    pub fn schema_url(self) -> &'static str {
        match self {
            Availability::InStock => "https://schema.org/InStock",
            Availability::OutOfStock => "https://schema.org/OutOfStock",
        }
    }
}

/// Resolve in-stock state. First match wins:
///
/// 1. explicit `OutOfStock` → false
/// 2. explicit `InStock` → true
/// 3. status `"reserved"` (trimmed, any case) → false
/// 4. otherwise the flag, defaulting to true when absent
pub fn resolve_availability(
    explicit: Option<Availability>,
    status: Option<&str>,
    in_stock_flag: Option<bool>,
) -> bool {
    match explicit {
        Some(Availability::OutOfStock) => false,
        Some(Availability::InStock) => true,
        None => {
            if status.is_some_and(|s| s.trim().eq_ignore_ascii_case("reserved")) {
                return false;
            }
            in_stock_flag != Some(false)
        }
    }
}
