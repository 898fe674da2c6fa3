//! Quote domain types and the text normalization rules applied on write.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CoreError;

/// Stored in place of text that is empty after trimming.
pub const EMPTY_TEXT_SENTINEL: &str = "NULL_TEXT_EMPTY";

/// A persisted quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub text: String,
}

/// One quote as submitted by a caller. `text` may be missing or null; it is
/// normalized to the sentinel in that case rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    #[serde(default)]
    pub text: Option<String>,
}

impl NewQuote {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// The text that will actually be stored for this quote.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        normalize_text(self.text.as_deref().unwrap_or_default())
    }

    /// True when the submitted text is missing or blank and will be stored as
    /// [`EMPTY_TEXT_SENTINEL`].
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.as_deref().is_none_or(|t| t.trim().is_empty())
    }
}

/// Write input accepted by the quote store: a single quote or an ordered batch.
///
/// Both shapes go through the same write operation so that interactive
/// single inserts and bulk imports stay interchangeable at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteInput {
    Single(NewQuote),
    Batch(Vec<NewQuote>),
}

impl QuoteInput {
    #[must_use]
    pub fn single(text: impl Into<String>) -> Self {
        Self::Single(NewQuote::new(text))
    }

    #[must_use]
    pub fn batch<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Batch(texts.into_iter().map(NewQuote::new).collect())
    }

    /// Resolve a JSON payload into a write input.
    ///
    /// An object is a single quote, an array of objects is a batch. Anything
    /// else, including a batch containing a non-object or a `text` that is
    /// not a string, is rejected before storage is touched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] describing the first malformed part
    /// of the payload.
    pub fn from_json(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(_) => parse_item(value)
                .map(Self::Single)
                .map_err(CoreError::Validation),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    parse_item(item)
                        .map_err(|reason| CoreError::Validation(format!("item {index}: {reason}")))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Batch),
            other => Err(CoreError::Validation(format!(
                "expected an object or an array of objects, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Borrow the quotes in submission order.
    #[must_use]
    pub fn items(&self) -> &[NewQuote] {
        match self {
            Self::Single(quote) => std::slice::from_ref(quote),
            Self::Batch(quotes) => quotes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Trim surrounding whitespace; blank text becomes [`EMPTY_TEXT_SENTINEL`].
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        EMPTY_TEXT_SENTINEL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_item(value: Value) -> Result<NewQuote, String> {
    if !value.is_object() {
        return Err(format!("expected an object, got {}", json_kind(&value)));
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
