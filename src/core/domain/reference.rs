//! `EventReference` — opaque user input naming a market.

/// An un-resolved reference to a prediction-market event, as handed to
/// `Predict` by the (out-of-scope) chat-facing command surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventReference {
    /// Free-text question, e.g. "Will the Fed cut rates in March?".
    FreeText(String),
    /// A full market URL.
    MarketUrl(String),
    /// A bare market slug.
    Slug(String),
}

impl EventReference {
    /// Parse a raw string into a reference variant.
    ///
    /// A value is a `MarketUrl` if it parses as an absolute URL, a `Slug`
    /// if it is a single URL-safe token with no whitespace, and `FreeText`
    /// otherwise. Empty or whitespace-only input is unparseable.
    pub fn parse(raw: &str) -> Result<Self, crate::error::Error> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(crate::error::Error::Reference(
                "event reference is empty".to_string(),
            ));
        }

        if url::Url::parse(trimmed).is_ok() {
            return Ok(Self::MarketUrl(trimmed.to_string()));
        }

        let looks_like_slug = !trimmed.contains(char::is_whitespace)
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if looks_like_slug && trimmed.len() <= 128 {
            return Ok(Self::Slug(trimmed.to_string()));
        }

        Ok(Self::FreeText(trimmed.to_string()))
    }
}
