use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogItem, Gender};
use crate::error::Result;

/// Listing sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    /// rating, highest first
    Popularity,
}

/// Filter for catalog listings.
///
/// Every unset field matches everything. `category` and `collection` also
/// match everything when set to `all` (any case).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub collection: Option<String>,
    pub category: Option<String>,
    /// any-of
    pub materials: Vec<String>,
    /// any-of
    pub brands: Vec<String>,
    /// any-of, matched against the item's sizes
    pub sizes: Vec<String>,
    pub color: Option<String>,
    pub gender: Option<Gender>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// case-insensitive substring of the name
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    /// `None` or `Some(0)` is unlimited
    pub limit: Option<usize>,
}

fn is_all(value: &str) -> bool {
    value.eq_ignore_ascii_case("all")
}

impl ProductFilter {
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(collection) = self.collection.as_deref().filter(|c| !is_all(c)) {
            if item.collections.as_deref() != Some(collection) {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref().filter(|c| !is_all(c)) {
            if item.category != category {
                return false;
            }
        }
        if !self.materials.is_empty()
            && !item.material.as_ref().is_some_and(|m| self.materials.contains(m))
        {
            return false;
        }
        if !self.brands.is_empty() && !item.brand.as_ref().is_some_and(|b| self.brands.contains(b)) {
            return false;
        }
        if !self.sizes.is_empty() && !item.sizes.iter().any(|s| self.sizes.contains(s)) {
            return false;
        }
        if let Some(color) = &self.color {
            if !item.colors.contains(color) {
                return false;
            }
        }
        if let Some(gender) = self.gender {
            if item.gender != Some(gender) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| item.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| item.price > max) {
            return false;
        }
        if let Some(search) = &self.search {
            if !item.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

impl Catalog {
    /// Filtered, optionally sorted listing. Sorting is stable, so equal keys
    /// keep catalog order.
    pub fn list(&self, filter: &ProductFilter) -> Vec<&CatalogItem> {
        let mut items: Vec<&CatalogItem> = self.items().iter().filter(|item| filter.matches(item)).collect();
        match filter.sort_by {
            Some(SortBy::PriceAsc) => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Some(SortBy::PriceDesc) => items.sort_by(|a, b| b.price.total_cmp(&a.price)),
            Some(SortBy::Popularity) => items.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            None => {}
        }
        if let Some(limit) = filter.limit.filter(|&l| l > 0) {
            items.truncate(limit);
        }
        items
    }

    /// Highest-rated item; the earliest one wins a tie.
    pub fn best_seller(&self) -> Option<&CatalogItem> {
        self.items()
            .iter()
            .reduce(|best, item| if item.rating > best.rating { item } else { best })
    }

    /// Most recently created items, newest first. Items without a creation
    /// time sort last.
    pub fn new_arrivals(&self, limit: usize) -> Vec<&CatalogItem> {
        let mut items: Vec<&CatalogItem> = self.items().iter().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit);
        items
    }

    /// Attribute-only lookup: the first `limit` items sharing the target's
    /// gender and category, in catalog order, without any scoring.
    pub fn similar_by_attributes(&self, id: &str, limit: usize) -> Result<Vec<&CatalogItem>> {
        let target = self.require(id)?;
        Ok(self
            .items()
            .iter()
            .filter(|item| item.id != target.id && item.gender == target.gender && item.category == target.category)
            .take(limit)
            .collect())
    }
}
