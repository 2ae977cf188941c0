//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order identifier newtype wrapper
///
/// Opaque to the exporter: stores hand out numeric post IDs, UUIDs or
/// order numbers, and all of them are carried as text.
///
/// # Examples
///
/// ```
/// use order_exporter::domain::ids::OrderId;
/// use std::str::FromStr;
///
/// let order_id = OrderId::from_str("1042").unwrap();
/// assert_eq!(order_id.as_str(), "1042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawOrderId", into = "String")]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new OrderId from a string
    ///
    /// Returns `Err` if the identifier is empty or whitespace only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Order ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the order ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Wire form of an order ID: snapshot files may carry numeric post IDs
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOrderId {
    Text(String),
    Number(u64),
}

impl TryFrom<RawOrderId> for OrderId {
    type Error = String;

    fn try_from(value: RawOrderId) -> Result<Self, Self::Error> {
        match value {
            RawOrderId::Text(text) => Self::new(text),
            RawOrderId::Number(number) => Ok(Self::from(number)),
        }
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_valid() {
        let id = OrderId::new("1042").unwrap();
        assert_eq!(id.as_str(), "1042");
        assert_eq!(id.to_string(), "1042");
    }

    #[test]
    fn test_order_id_empty() {
        assert!(OrderId::new("").is_err());
        assert!(OrderId::new("   ").is_err());
    }

    #[test]
    fn test_order_id_from_numeric() {
        let id = OrderId::from(77u64);
        assert_eq!(id.into_inner(), "77");
    }

    #[test]
    fn test_order_id_serde_rejects_empty() {
        let ok: OrderId = serde_json::from_str("\"1042\"").unwrap();
        assert_eq!(ok.as_str(), "1042");

        let numeric: OrderId = serde_json::from_str("1042").unwrap();
        assert_eq!(numeric, ok);

        let err = serde_json::from_str::<OrderId>("\"\"");
        assert!(err.is_err());
    }
}
