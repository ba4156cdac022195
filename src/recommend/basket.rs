use crate::catalog::{CatalogItem, Gender};
use crate::error::{RecommendError, Result};
use crate::vectorizer::{FeatureSignature, FeatureSource};

/// Parse the cart payload: a JSON array of product id strings.
///
/// A missing payload is an empty cart. Anything that is not an array of
/// strings is `MalformedCart`.
pub fn parse_cart_ids(raw: Option<&str>) -> Result<Vec<String>> {
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str::<Vec<String>>(raw)
            .map_err(|e| RecommendError::MalformedCart(e.to_string())),
    }
}

/// Synthetic document standing in for a whole cart.
///
/// The category slot carries the full signatures of every cart item, and the
/// brand, size and material slots repeat those fields again, so cart features
/// weigh more than they would in a single item. The gender slot holds each
/// distinct gender once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasketProfile {
    category: String,
    brand: String,
    sizes: Vec<String>,
    material: String,
    genders: Vec<Gender>,
    gender_text: String,
}

impl BasketProfile {
    pub fn builder() -> BasketBuilder {
        BasketBuilder::default()
    }

    /// Distinct genders across the cart, in first-seen order
    pub fn genders(&self) -> &[Gender] {
        &self.genders
    }
}

impl FeatureSource for BasketProfile {
    fn category(&self) -> &str {
        &self.category
    }

    fn brand(&self) -> Option<&str> {
        Some(&self.brand)
    }

    fn sizes(&self) -> &[String] {
        &self.sizes
    }

    fn material(&self) -> Option<&str> {
        Some(&self.material)
    }

    fn gender(&self) -> Option<&str> {
        Some(&self.gender_text)
    }
}

#[derive(Debug, Default)]
pub struct BasketBuilder {
    signatures: Vec<String>,
    brands: Vec<String>,
    sizes: Vec<String>,
    materials: Vec<String>,
    genders: Vec<Gender>,
}

impl BasketBuilder {
    pub fn add(&mut self, item: &CatalogItem) -> &mut Self {
        self.signatures.push(FeatureSignature::from_source(item).as_str().to_string());
        if let Some(brand) = item.brand.as_ref().filter(|b| !b.is_empty()) {
            self.brands.push(brand.clone());
        }
        self.sizes.extend(item.sizes.iter().cloned());
        if let Some(material) = item.material.as_ref().filter(|m| !m.is_empty()) {
            self.materials.push(material.clone());
        }
        if let Some(gender) = item.gender {
            if !self.genders.contains(&gender) {
                self.genders.push(gender);
            }
        }
        self
    }

    pub fn extend<'a, I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a CatalogItem>,
    {
        for item in items {
            self.add(item);
        }
        self
    }

    pub fn build(&self) -> BasketProfile {
        BasketProfile {
            category: self.signatures.join(" "),
            brand: self.brands.join(" "),
            sizes: self.sizes.clone(),
            material: self.materials.join(" "),
            gender_text: self
                .genders
                .iter()
                .map(Gender::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            genders: self.genders.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cart_payload() {
        assert_eq!(parse_cart_ids(None).unwrap(), Vec::<String>::new());
        assert_eq!(parse_cart_ids(Some("[]")).unwrap(), Vec::<String>::new());
        assert_eq!(parse_cart_ids(Some(r#"["a","b"]"#)).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn rejects_malformed_payload() {
        for raw in ["not json", r#"{"id":"a"}"#, "[1, 2]", ""] {
            assert!(
                matches!(parse_cart_ids(Some(raw)), Err(RecommendError::MalformedCart(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn basket_signature_aggregates_cart() {
        let a = CatalogItem::new("a", "Top Wear")
            .with_brand("A")
            .with_sizes(&["M"])
            .with_material("Cotton")
            .with_gender(Gender::Men);
        let b = CatalogItem::new("b", "Bottom Wear").with_sizes(&["32"]).with_gender(Gender::Men);
        let c = CatalogItem::new("c", "Dresses").with_gender(Gender::Women);

        let basket = BasketProfile::builder().extend([&a, &b, &c]).build();
        assert_eq!(basket.genders(), &[Gender::Men, Gender::Women]);

        let sig = FeatureSignature::from_source(&basket);
        let tokens: Vec<&str> = sig.tokens().collect();
        assert_eq!(
            tokens,
            vec![
                "top", "wear", "a", "m", "cotton", "men", // item a
                "bottom", "wear", "32", "men", // item b
                "dresses", "women", // item c
                "a", "m", "32", "cotton", "men", "women",
            ]
        );
    }

    #[test]
    fn empty_basket_is_blank() {
        let basket = BasketProfile::builder().build();
        assert!(FeatureSignature::from_source(&basket).is_blank());
        assert!(basket.genders().is_empty());
    }
}
