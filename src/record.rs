use crate::error::SibylError;
use serde_derive::{Deserialize, Serialize};

/// Date format the generator stamps onto every record,
/// e.g. "2025-01-29 14:35:20".
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Full wire schema of one synthetic social post, as published to the topic.
///
/// The consumer only ever looks at `timestamp` and `sentiment`; the rest of
/// the fields ride along untouched.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SocialPost {
    pub message: String,
    pub author: String,
    pub timestamp: String,
    pub category: String,
    pub sentiment: f64,
    pub keyword_mentioned: String,
    pub message_length: usize,
}

/// The two values the trend chart consumes from each record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub timestamp: String,
    pub sentiment: f64,
}

impl TrendPoint {
    /// Extract a trend point from a raw payload.
    ///
    /// The payload must be UTF-8 JSON carrying an object; anything else is
    /// a `MalformedMessage`. An absent `timestamp` or `sentiment` key — or a
    /// sentiment that is not representable as a float — is a `MissingField`.
    /// Extra keys are ignored.
    pub fn from_payload(raw: &[u8]) -> Result<Self, SibylError> {
        let text = std::str::from_utf8(raw)
            .map_err(|err| SibylError::MalformedMessage(format!("invalid UTF-8: {}", err)))?;
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|err| SibylError::MalformedMessage(format!("invalid JSON: {}", err)))?;
        let record = value
            .as_object()
            .ok_or_else(|| SibylError::MalformedMessage(format!("not a JSON object: {}", text)))?;

        let timestamp = record
            .get("timestamp")
            .and_then(|v| v.as_str())
            .ok_or(SibylError::MissingField("timestamp"))?;
        let sentiment = record
            .get("sentiment")
            .and_then(|v| v.as_f64())
            .ok_or(SibylError::MissingField("sentiment"))?;

        Ok(TrendPoint {
            timestamp: timestamp.to_owned(),
            sentiment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_timestamp_and_sentiment() {
        let raw = br#"{"message": "I love Python!", "author": "Eve", "sentiment": 0.9, "timestamp": "2025-01-29 14:35:20"}"#;
        let point = TrendPoint::from_payload(raw).unwrap();
        assert_eq!(point.timestamp, "2025-01-29 14:35:20");
        assert!((point.sentiment - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn integer_sentiment_is_accepted() {
        let point = TrendPoint::from_payload(br#"{"timestamp": "T1", "sentiment": 1}"#).unwrap();
        assert!((point.sentiment - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn truncated_json_is_malformed() {
        let err = TrendPoint::from_payload(br#"{"bad json"#).unwrap_err();
        assert!(matches!(err, SibylError::MalformedMessage(_)));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = TrendPoint::from_payload(&[0xff, 0xfe, 0x7b]).unwrap_err();
        assert!(matches!(err, SibylError::MalformedMessage(_)));
    }

    #[test]
    fn non_object_json_is_malformed() {
        let err = TrendPoint::from_payload(br#"[1, 2, 3]"#).unwrap_err();
        assert!(matches!(err, SibylError::MalformedMessage(_)));
    }

    #[test]
    fn missing_timestamp_is_reported() {
        let err = TrendPoint::from_payload(br#"{"sentiment": 0.5}"#).unwrap_err();
        assert!(matches!(err, SibylError::MissingField("timestamp")));
    }

    #[test]
    fn missing_sentiment_is_reported() {
        let err = TrendPoint::from_payload(br#"{"timestamp": "T1"}"#).unwrap_err();
        assert!(matches!(err, SibylError::MissingField("sentiment")));
    }

    #[test]
    fn non_numeric_sentiment_counts_as_missing() {
        let err =
            TrendPoint::from_payload(br#"{"timestamp": "T1", "sentiment": "great"}"#).unwrap_err();
        assert!(matches!(err, SibylError::MissingField("sentiment")));
    }

    #[test]
    fn social_post_round_trips_through_json() {
        let post = SocialPost {
            message: "I just tried a new recipe! It was amazing.".to_owned(),
            author: "Eve".to_owned(),
            timestamp: "2025-01-29 14:35:20".to_owned(),
            category: "food".to_owned(),
            sentiment: 0.73,
            keyword_mentioned: "recipe".to_owned(),
            message_length: 42,
        };
        let encoded = serde_json::to_string(&post).unwrap();
        let decoded: SocialPost = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.author, post.author);
        assert_eq!(decoded.message_length, post.message_length);
        assert!((decoded.sentiment - post.sentiment).abs() < f64::EPSILON);
    }
}
