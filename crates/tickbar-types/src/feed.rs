//! Messages delivered by a price feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single message as sent by the price relay.
///
/// Messages are JSON objects tagged by a `type` field:
///
/// ```json
/// {"type": "message", "content": "welcome"}
/// {"type": "price", "symbol": "Crypto.BTC/USD", "price": 42000.5}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedMessage {
    /// Connection status or other informational text.
    #[serde(rename = "message")]
    Info {
        /// Free-form message text.
        content: String,
    },
    /// A price update for a symbol.
    Price {
        /// Symbol the price belongs to.
        symbol: String,
        /// Aggregate price. The relay sends `null` when no price is available.
        price: Option<f64>,
        /// Price type reported by the upstream network.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        price_type: Option<String>,
        /// Aggregate price status reported by the upstream network.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<String>,
        /// Confidence interval around the aggregate price.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confidence: Option<f64>,
    },
}

impl FeedMessage {
    /// Creates an informational message.
    #[must_use]
    pub fn info(content: impl Into<String>) -> Self {
        Self::Info {
            content: content.into(),
        }
    }

    /// Creates a bare price message.
    #[must_use]
    pub fn price(symbol: impl Into<String>, price: f64) -> Self {
        Self::Price {
            symbol: symbol.into(),
            price: Some(price),
            price_type: None,
            status: None,
            confidence: None,
        }
    }

    /// Returns the symbol of a price message.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Price { symbol, .. } => Some(symbol),
            Self::Info { .. } => None,
        }
    }

    /// Returns true if this is a price message.
    #[must_use]
    pub const fn is_price(&self) -> bool {
        matches!(self, Self::Price { .. })
    }
}

/// A feed message together with the time it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEvent {
    /// Time the message arrived (UTC).
    pub received_at: DateTime<Utc>,
    /// The message itself.
    pub message: FeedMessage,
}

impl FeedEvent {
    /// Creates a new event.
    #[must_use]
    pub const fn new(received_at: DateTime<Utc>, message: FeedMessage) -> Self {
        Self {
            received_at,
            message,
        }
    }

    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn now(message: FeedMessage) -> Self {
        Self::new(Utc::now(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_info() {
        let msg: FeedMessage =
            serde_json::from_str(r#"{"type":"message","content":"welcome"}"#).unwrap();
        assert_eq!(msg, FeedMessage::info("welcome"));
        assert!(!msg.is_price());
        assert_eq!(msg.symbol(), None);
    }

    #[test]
    fn test_parse_full_price() {
        let raw = r#"{
            "type": "price",
            "symbol": "Crypto.SOL/USD",
            "price_type": "PythPriceType.PRICE",
            "status": "PythPriceStatus.TRADING",
            "price": 23.51,
            "confidence": 0.012
        }"#;
        let msg: FeedMessage = serde_json::from_str(raw).unwrap();

        let FeedMessage::Price {
            symbol,
            price,
            status,
            confidence,
            ..
        } = msg
        else {
            panic!("expected price message");
        };
        assert_eq!(symbol, "Crypto.SOL/USD");
        assert_eq!(price, Some(23.51));
        assert_eq!(status.as_deref(), Some("PythPriceStatus.TRADING"));
        assert_eq!(confidence, Some(0.012));
    }

    #[test]
    fn test_parse_null_price() {
        let msg: FeedMessage =
            serde_json::from_str(r#"{"type":"price","symbol":"FX.EUR/USD","price":null}"#)
                .unwrap();
        assert!(matches!(msg, FeedMessage::Price { price: None, .. }));
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<FeedMessage>(r#"{"type":"trade","qty":1}"#).is_err());
    }

    #[test]
    fn test_bare_price_omits_optional_fields() {
        let json = serde_json::to_string(&FeedMessage::price("X", 1.5)).unwrap();
        assert_eq!(json, r#"{"type":"price","symbol":"X","price":1.5}"#);
    }
}
