use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Rating shown when live extraction is impossible. Mirrored by the values
/// baked into the static markup; keep the two in sync by hand.
pub const FALLBACK_RATING_VALUE: f64 = 4.9;

/// Review count shown when live extraction is impossible. Same sync rule
/// as [`FALLBACK_RATING_VALUE`].
pub const FALLBACK_REVIEW_COUNT: u32 = 1191;

lazy_static! {
    /// Timestamp served with the fallback values. Deliberately historical,
    /// so a fallback response is distinguishable from a fresh scrape.
    pub static ref FALLBACK_UPDATED: DateTime<Utc> =
        Utc.with_ymd_and_hms(2025, 9, 24, 0, 0, 0).unwrap();
}

/// One scrape result: the value/count pair the site displays plus the time
/// the scrape happened. Produced fresh per fetch, never persisted.
///
/// The serialized field names are the wire contract consumed by the
/// presenter and by edge caches; do not rename them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSnapshot {
    pub rating_value: f64,
    pub review_count: u32,
    #[serde(rename = "updatedISO")]
    pub updated_iso: DateTime<Utc>,
}

impl RatingSnapshot {
    /// The compiled-in snapshot used whenever the upstream page cannot be
    /// fetched at all.
    pub fn fallback() -> Self {
        Self {
            rating_value: FALLBACK_RATING_VALUE,
            review_count: FALLBACK_REVIEW_COUNT,
            updated_iso: *FALLBACK_UPDATED,
        }
    }
}

/// Outcome of a rating fetch.
///
/// Both arms carry a usable snapshot; the arm records whether it came from
/// the live page or from the compiled-in constants, so callers can observe
/// degradation without changing what they serve.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Live(RatingSnapshot),
    Fallback(RatingSnapshot),
}

impl FetchOutcome {
    pub fn snapshot(&self) -> &RatingSnapshot {
        match self {
            Self::Live(snapshot) | Self::Fallback(snapshot) => snapshot,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchOutcome, RatingSnapshot};

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(&RatingSnapshot::fallback()).unwrap();

        assert_eq!(json["ratingValue"], 4.9);
        assert_eq!(json["reviewCount"], 1191);
        assert!(json["updatedISO"]
            .as_str()
            .unwrap()
            .starts_with("2025-09-24T00:00:00"));
    }

    #[test]
    fn test_wire_deserialize() {
        let body = r#"{"ratingValue":4.95,"reviewCount":1200,"updatedISO":"2025-10-01T12:30:00Z"}"#;
        let snapshot: RatingSnapshot = serde_json::from_str(body).unwrap();

        assert_eq!(snapshot.rating_value, 4.95);
        assert_eq!(snapshot.review_count, 1200);
    }

    #[test]
    fn test_outcome_accessors() {
        let fallback = FetchOutcome::Fallback(RatingSnapshot::fallback());

        assert!(!fallback.is_live());
        assert_eq!(fallback.snapshot().review_count, 1191);
    }
}
