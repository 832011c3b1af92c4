//! Price and numeric-input sanitizing
//!
//! Listing data arrives as whatever the catalog or the admin form produced:
//! `599000`, `"599,000 บาท"`, `"45,000 km"`, `"5 ที่นั่ง"`. These helpers turn
//! such values into numbers or reject them.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

/// A loosely-typed scalar as found in catalog records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl LooseValue {
    /// String form, the way a browser would stringify the value.
    pub fn to_text(&self) -> String {
        match self {
            LooseValue::Number(n) => n.to_string(),
            LooseValue::Text(s) => s.clone(),
            LooseValue::Bool(b) => b.to_string(),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            LooseValue::Number(n) => *n != 0.0 && !n.is_nan(),
            LooseValue::Text(s) => !s.is_empty(),
            LooseValue::Bool(b) => *b,
        }
    }
}

impl Serialize for LooseValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LooseValue::Number(n) => match json_number(*n) {
                Some(num) => num.serialize(serializer),
                None => serializer.serialize_none(),
            },
            LooseValue::Text(s) => serializer.serialize_str(s),
            LooseValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for LooseValue {
    fn from(s: &str) -> Self {
        LooseValue::Text(s.to_string())
    }
}

impl From<String> for LooseValue {
    fn from(s: String) -> Self {
        LooseValue::Text(s)
    }
}

impl From<f64> for LooseValue {
    fn from(n: f64) -> Self {
        LooseValue::Number(n)
    }
}

impl From<i64> for LooseValue {
    fn from(n: i64) -> Self {
        LooseValue::Number(n as f64)
    }
}

impl From<i32> for LooseValue {
    fn from(n: i32) -> Self {
        LooseValue::Number(f64::from(n))
    }
}

/// Normalize a raw price into the plain numeric string schema.org expects
/// (`"599000.00"`).
///
/// Returns `None` when the value is negative, non-finite or carries no
/// digits. Callers must omit the price rather than substitute a zero.
pub fn sanitize_price(input: &LooseValue) -> Option<String> {
    let n = match input {
        LooseValue::Number(n) => *n,
        LooseValue::Text(s) => {
            if has_minus_sign(s) {
                return None;
            }
            parse_decimal(s)?
        }
        LooseValue::Bool(_) => return None,
    };

    if n.is_finite() && n >= 0.0 {
        // abs() folds -0.0 into 0.0
        Some(format!("{:.2}", n.abs()))
    } else {
        None
    }
}

/// True when the first number in `raw` is written with a minus sign, even
/// behind a currency symbol or label (`"฿-5"`, `"ราคา -500"`).
fn has_minus_sign(raw: &str) -> bool {
    let Some(first_digit) = raw.find(|c: char| c.is_ascii_digit()) else {
        return false;
    };
    let before = raw[..first_digit].trim_end().trim_end_matches('.').trim_end();
    before.ends_with('-') || before.ends_with('\u{2212}')
}

/// Numeric reading of a loose value: numbers as-is, text through
/// `parse_decimal`, booleans never.
pub fn loose_number(input: &LooseValue) -> Option<f64> {
    match input {
        LooseValue::Number(n) => Some(*n),
        LooseValue::Text(s) => parse_decimal(s),
        LooseValue::Bool(_) => None,
    }
}

/// Drop everything but digits and `.` and parse the longest numeric prefix
/// of what remains (`"1.2.3"` parses as `1.2`).
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in cleaned.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    cleaned[..end].parse::<f64>().ok()
}

/// Integer prefix of a value (`"5 ที่นั่ง"` is 5, `5.7` is 5).
pub fn parse_leading_int(input: &LooseValue) -> Option<i64> {
    let text = input.to_text();
    let trimmed = text.trim_start();

    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}

/// JSON number for a finite float, written as an integer when it has no
/// fractional part.
pub fn json_number(n: f64) -> Option<Number> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Some(Number::from(n as i64))
    } else {
        Number::from_f64(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_thai_currency_text() {
        assert_eq!(
            sanitize_price(&"599,000 บาท".into()),
            Some("599000.00".to_string())
        );
        assert_eq!(sanitize_price(&"฿350,000".into()), Some("350000.00".to_string()));
    }

    #[test]
    fn test_sanitize_number() {
        assert_eq!(sanitize_price(&LooseValue::Number(599000.0)), Some("599000.00".to_string()));
        assert_eq!(sanitize_price(&12.5.into()), Some("12.50".to_string()));
        assert_eq!(sanitize_price(&LooseValue::Number(0.0)), Some("0.00".to_string()));
    }

    #[test]
    fn test_sanitize_rejects() {
        assert_eq!(sanitize_price(&LooseValue::Number(-5.0)), None);
        assert_eq!(sanitize_price(&"-5".into()), None);
        assert_eq!(sanitize_price(&"฿-5".into()), None);
        assert_eq!(sanitize_price(&"ราคา -500".into()), None);
        assert_eq!(sanitize_price(&"- 1,200 บาท".into()), None);
        assert_eq!(sanitize_price(&"−300".into()), None);
        assert_eq!(sanitize_price(&"abc".into()), None);
        assert_eq!(sanitize_price(&"".into()), None);
        assert_eq!(sanitize_price(&".".into()), None);
        assert_eq!(sanitize_price(&f64::NAN.into()), None);
        assert_eq!(sanitize_price(&f64::INFINITY.into()), None);
        assert_eq!(sanitize_price(&LooseValue::Bool(true)), None);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for raw in ["599,000 บาท", "1.5", "0", "12,345.678", "฿ 99"] {
            let once = sanitize_price(&raw.into()).unwrap();
            let twice = sanitize_price(&once.as_str().into()).unwrap();
            assert_eq!(once, twice, "input {raw}");
        }
    }

    #[test]
    fn test_sanitize_ignores_dashes_after_the_number() {
        assert_eq!(
            sanitize_price(&"฿350,000 (ต่อรองได้ - โทร)".into()),
            Some("350000.00".to_string())
        );
    }

    #[test]
    fn test_loose_number() {
        assert_eq!(loose_number(&"4.8".into()), Some(4.8));
        assert_eq!(loose_number(&LooseValue::Number(120.0)), Some(120.0));
        assert_eq!(loose_number(&LooseValue::Bool(true)), None);
        assert_eq!(loose_number(&"ดีมาก".into()), None);
    }

    #[test]
    fn test_parse_decimal_prefix() {
        assert_eq!(parse_decimal("1.2.3"), Some(1.2));
        assert_eq!(parse_decimal("45,000 km"), Some(45000.0));
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal("ไม่ระบุ"), None);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int(&"5 ที่นั่ง".into()), Some(5));
        assert_eq!(parse_leading_int(&5.7.into()), Some(5));
        assert_eq!(parse_leading_int(&" 7".into()), Some(7));
        assert_eq!(parse_leading_int(&"-2".into()), Some(-2));
        assert_eq!(parse_leading_int(&"seats: 5".into()), None);
    }

    #[test]
    fn test_loose_value_deserialize_and_serialize() {
        let n: LooseValue = serde_json::from_str("2019").unwrap();
        let s: LooseValue = serde_json::from_str("\"2019\"").unwrap();
        assert_eq!(n, LooseValue::Number(2019.0));
        assert_eq!(s, LooseValue::Text("2019".to_string()));
        assert_eq!(serde_json::to_string(&n).unwrap(), "2019");
        assert_eq!(serde_json::to_string(&LooseValue::Number(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn test_truthiness() {
        assert!(!LooseValue::Number(0.0).is_truthy());
        assert!(!LooseValue::Text(String::new()).is_truthy());
        assert!(LooseValue::Text("0".to_string()).is_truthy());
    }
}
