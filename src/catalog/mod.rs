pub mod listing;

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// Target audience of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
            Gender::Unisex => "Unisex",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// One product record as handed over by the storage layer.
///
/// The recommender only reads `category`, `brand`, `sizes`, `material` and
/// `gender` for similarity; the remaining fields drive filtering (publication
/// flags) and the listing queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collections: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub num_reviews: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_available() -> bool {
    true
}

impl CatalogItem {
    /// Minimal item with only the identifying and feature fields set.
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            price: 0.0,
            discount_price: None,
            category: category.into(),
            brand: None,
            sizes: Vec::new(),
            colors: Vec::new(),
            collections: None,
            material: None,
            gender: None,
            images: Vec::new(),
            is_featured: false,
            is_published: true,
            is_available: true,
            rating: 0.0,
            num_reviews: 0,
            tags: Vec::new(),
            created_at: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_sizes<T>(mut self, sizes: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        self.sizes = sizes.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// published and available, i.e. eligible for cart recommendations
    #[inline]
    pub fn is_listed(&self) -> bool {
        self.is_published && self.is_available
    }
}

/// Ordered, read-only snapshot of the product catalog.
///
/// Catalog order is significant: ranking ties are broken by it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Decode a snapshot from a JSON array of items.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let catalog: Catalog = serde_json::from_slice(bytes)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Decode a snapshot from CBOR.
    pub fn from_cbor_slice(bytes: &[u8]) -> Result<Self> {
        let catalog: Catalog = serde_cbor::from_slice(bytes)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_cbor_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// ids must be unique, otherwise target exclusion is ambiguous
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(RecommendError::Snapshot(format!("duplicate product id `{}`", item.id)));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Like `get`, but an unknown id is a `NotFound` error.
    pub fn require(&self, id: &str) -> Result<&CatalogItem> {
        self.get(id).ok_or_else(|| RecommendError::NotFound(id.to_string()))
    }

    /// Items that are both published and available, in catalog order.
    pub fn listed(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(|item| item.is_listed())
    }
}

impl From<Vec<CatalogItem>> for Catalog {
    fn from(items: Vec<CatalogItem>) -> Self {
        Self::new(items)
    }
}
