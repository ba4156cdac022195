use std::fmt;

use crate::catalog::CatalogItem;

/// Anything that can be turned into a feature signature.
///
/// Implemented by catalog items and by the synthetic cart basket, so both go
/// through the same extractor.
pub trait FeatureSource {
    fn category(&self) -> &str;
    fn brand(&self) -> Option<&str>;
    fn sizes(&self) -> &[String];
    fn material(&self) -> Option<&str>;
    fn gender(&self) -> Option<&str>;
}

impl FeatureSource for CatalogItem {
    fn category(&self) -> &str {
        &self.category
    }

    fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    fn sizes(&self) -> &[String] {
        &self.sizes
    }

    fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    fn gender(&self) -> Option<&str> {
        self.gender.as_ref().map(|g| g.as_str())
    }
}

/// Lowercased "document" text of one item.
///
/// Built as `category brand sizes.. material gender`, one space between
/// fields; a missing field still takes its slot as an empty string, so the
/// text may contain runs of whitespace. Use [`FeatureSignature::tokens`]
/// rather than splitting on single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureSignature {
    text: String,
}

impl FeatureSignature {
    pub fn from_source<S>(source: &S) -> Self
    where
        S: FeatureSource + ?Sized,
    {
        let sizes = source.sizes().join(" ");
        let fields: [&str; 5] = [
            source.category(),
            source.brand().unwrap_or(""),
            sizes.as_str(),
            source.material().unwrap_or(""),
            source.gender().unwrap_or(""),
        ];
        Self {
            text: fields.join(" ").to_lowercase(),
        }
    }

    /// whitespace-separated tokens, empty pieces dropped
    #[inline]
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// true when the signature has no tokens at all
    pub fn is_blank(&self) -> bool {
        self.tokens().next().is_none()
    }
}

impl fmt::Display for FeatureSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
