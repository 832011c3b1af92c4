//! Review gate
//!
//! Rating markup without real reviews behind it is penalized by Search
//! Console, so these blocks exist only when the data does.

use serde::Serialize;

use crate::model::{ReviewEntry, ReviewSummary};
use crate::price::{loose_number, parse_leading_int, LooseValue};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "AggregateRating", rename_all = "camelCase")]
pub struct AggregateRating {
    pub rating_value: f64,
    pub review_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "Person")]
pub struct Person {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "Rating", rename_all = "camelCase")]
pub struct Rating {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "Review", rename_all = "camelCase")]
pub struct Review {
    pub author: Person,
    pub review_rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
}

impl From<&ReviewEntry> for Review {
    fn from(entry: &ReviewEntry) -> Self {
        Review {
            author: Person {
                name: entry.author.clone(),
            },
            review_rating: Rating {
                rating_value: entry.rating.as_ref().and_then(loose_number),
            },
            name: entry.title.clone(),
            review_body: entry.text.clone(),
            date_published: entry.date.clone(),
        }
    }
}

/// Rating and review blocks that survived the gate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewBlocks {
    pub aggregate_rating: Option<AggregateRating>,
    pub reviews: Vec<Review>,
}

/// Emit `aggregateRating` only when both rating and count read as non-zero
/// numbers (`4.8`, `"4.8"`, `"120 รีวิว"`); emit `review` only for a
/// non-empty list.
pub fn gate(summary: Option<&ReviewSummary>) -> ReviewBlocks {
    let Some(summary) = summary else {
        return ReviewBlocks::default();
    };

    let rating = summary
        .rating_value
        .as_ref()
        .and_then(loose_number)
        .filter(|r| r.is_finite() && *r != 0.0);
    let count = summary
        .review_count
        .as_ref()
        .and_then(review_count)
        .filter(|c| *c > 0);

    let aggregate_rating = match (rating, count) {
        (Some(rating_value), Some(review_count)) => Some(AggregateRating {
            rating_value,
            review_count,
        }),
        _ => {
            if summary.rating_value.is_some() || summary.review_count.is_some() {
                tracing::debug!(
                    rating = ?summary.rating_value,
                    count = ?summary.review_count,
                    "incomplete rating data, aggregateRating omitted"
                );
            }
            None
        }
    };

    ReviewBlocks {
        aggregate_rating,
        reviews: summary.reviews.iter().map(Review::from).collect(),
    }
}

fn review_count(raw: &LooseValue) -> Option<u32> {
    parse_leading_int(raw).and_then(|n| u32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_summary_no_blocks() {
        assert_eq!(gate(None), ReviewBlocks::default());
    }

    #[test]
    fn test_zero_count_suppresses_aggregate() {
        let summary = ReviewSummary {
            rating_value: Some(LooseValue::Number(4.8)),
            review_count: Some(LooseValue::Number(0.0)),
            reviews: vec![],
        };
        assert!(gate(Some(&summary)).aggregate_rating.is_none());

        let summary = ReviewSummary {
            rating_value: Some(LooseValue::Number(4.8)),
            review_count: None,
            reviews: vec![],
        };
        assert!(gate(Some(&summary)).aggregate_rating.is_none());
    }

    #[test]
    fn test_complete_summary() {
        let summary = ReviewSummary {
            rating_value: Some(LooseValue::Number(4.5)),
            review_count: Some(LooseValue::Number(12.0)),
            reviews: vec![ReviewEntry {
                author: "สมชาย".to_string(),
                rating: Some(LooseValue::Number(5.0)),
                title: Some("บริการดี".to_string()),
                text: Some("รถสภาพดีมาก".to_string()),
                date: Some("2025-12-01".to_string()),
            }],
        };
        let blocks = gate(Some(&summary));
        assert_eq!(
            serde_json::to_value(blocks.aggregate_rating.unwrap()).unwrap(),
            json!({"@type": "AggregateRating", "ratingValue": 4.5, "reviewCount": 12})
        );
        assert_eq!(
            serde_json::to_value(&blocks.reviews[0]).unwrap(),
            json!({
                "@type": "Review",
                "author": {"@type": "Person", "name": "สมชาย"},
                "reviewRating": {"@type": "Rating", "ratingValue": 5.0},
                "name": "บริการดี",
                "reviewBody": "รถสภาพดีมาก",
                "datePublished": "2025-12-01"
            })
        );
    }

    #[test]
    fn test_text_rating_fields() {
        let summary = ReviewSummary {
            rating_value: Some("4.8".into()),
            review_count: Some("120".into()),
            reviews: vec![ReviewEntry {
                author: "Nok".to_string(),
                rating: Some("5".into()),
                ..ReviewEntry::default()
            }],
        };
        let blocks = gate(Some(&summary));
        assert_eq!(
            blocks.aggregate_rating,
            Some(AggregateRating {
                rating_value: 4.8,
                review_count: 120
            })
        );
        assert_eq!(blocks.reviews[0].review_rating.rating_value, Some(5.0));

        let summary = ReviewSummary {
            rating_value: Some("ดีมาก".into()),
            review_count: Some("120".into()),
            reviews: vec![],
        };
        assert!(gate(Some(&summary)).aggregate_rating.is_none());

        let summary = ReviewSummary {
            rating_value: Some("4.8".into()),
            review_count: Some("0".into()),
            reviews: vec![],
        };
        assert!(gate(Some(&summary)).aggregate_rating.is_none());
    }

    #[test]
    fn test_reviews_without_aggregate() {
        let summary = ReviewSummary {
            rating_value: None,
            review_count: None,
            reviews: vec![ReviewEntry {
                author: "A".to_string(),
                ..ReviewEntry::default()
            }],
        };
        let blocks = gate(Some(&summary));
        assert!(blocks.aggregate_rating.is_none());
        assert_eq!(blocks.reviews.len(), 1);
    }
}
