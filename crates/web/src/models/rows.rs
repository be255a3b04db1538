//! Typed views over hosted-store rows.
//!
//! `places` and `products` are owned by the hosted database and read-only
//! here. Only the columns the pages show are modelled; unknown columns are
//! ignored, and missing optional ones render as blank.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use jharkhand_tourism_core::{Price, SentimentScore};

/// An itinerary destination.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub id: Value,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Place {
    /// HTML anchor for this place.
    #[must_use]
    pub fn anchor(&self) -> String {
        row_key("place", &self.id)
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        self.image_url.as_deref().unwrap_or_default()
    }
}

/// A marketplace listing (local handicraft, tour package, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Value,
    pub name: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    /// HTML anchor for this product.
    #[must_use]
    pub fn anchor(&self) -> String {
        row_key("product", &self.id)
    }

    /// Formatted price, or "Price on request" when the row has none.
    #[must_use]
    pub fn price_display(&self) -> String {
        self.price
            .map_or_else(|| "Price on request".to_string(), |p| p.display())
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn seller(&self) -> &str {
        self.seller.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        self.image_url.as_deref().unwrap_or_default()
    }
}

/// A feedback row as written to `feedback`.
///
/// The score is computed once at submission and never updated.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEntry {
    pub name: String,
    pub email: String,
    pub message: String,
    pub sentiment_score: SentimentScore,
}

/// Build an anchor id from a row id of any JSON shape.
fn row_key(prefix: &str, id: &Value) -> String {
    match id {
        Value::String(s) => format!("{prefix}-{s}"),
        Value::Number(n) => format!("{prefix}-{n}"),
        _ => prefix.to_string(),
    }
}
