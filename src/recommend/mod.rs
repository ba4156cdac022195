pub mod basket;
pub mod comparison;
pub mod hits;

use num::Num;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogItem};
use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::recommend::basket::{parse_cart_ids, BasketProfile};
use crate::recommend::comparison::{rank_differences, Algorithm, AlgorithmResult, ComparisonReport, Disagreement};
use crate::recommend::hits::Hits;
use crate::vectorizer::{BagOfWordsEngine, DocumentFrequency, FeatureSignature, FeatureSource, TfIdfEngine, VectorizeEngine};

/// Content-based product recommender.
///
/// Stateless between calls: every entry point builds its own document
/// frequency table from the catalog snapshot it is given, so one instance can
/// serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(config: RecommenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Score `candidates` against `query`, best first, at most `limit`.
    fn rank<'a, N, E, Q>(engine: &E, query: &Q, candidates: &[&'a CatalogItem], limit: usize) -> Hits<'a>
    where
        N: Num + Copy + Into<f64> + Send + Sync,
        E: VectorizeEngine<N> + Sync,
        Q: FeatureSource + ?Sized,
    {
        let query_vec = engine.vectorize(&FeatureSignature::from_source(query));
        let mut hits = Hits::score(engine, &query_vec, candidates);
        hits.sort_by_score_desc().truncate(limit);
        hits
    }

    /// Products most similar to `id`, restricted to the same gender and
    /// category.
    pub fn similar_products<'a>(&self, catalog: &'a Catalog, id: &str) -> Result<Vec<&'a CatalogItem>> {
        Ok(self.similar_products_scored(catalog, id)?.items())
    }

    /// Like `similar_products`, keeping the scores.
    pub fn similar_products_scored<'a>(&self, catalog: &'a Catalog, id: &str) -> Result<Hits<'a>> {
        let target = catalog.require(id)?;
        let df = DocumentFrequency::from_sources(catalog.items());
        let engine = TfIdfEngine::with_policy(&df, self.config.idf_policy);

        let candidates: Vec<&CatalogItem> = catalog
            .items()
            .iter()
            .filter(|item| item.id != target.id && item.gender == target.gender && item.category == target.category)
            .collect();
        debug!(
            product = %target.id,
            candidates = candidates.len(),
            doc_num = df.doc_num(),
            vocab = df.vocab_size(),
            "scoring similar products"
        );

        Ok(Self::rank(&engine, target, &candidates, self.config.similar_limit))
    }

    /// "You may also like" for a raw cart payload (JSON array of ids).
    /// A missing, empty or malformed payload falls back to a random sample.
    pub fn cart_recommendations_from_payload<'a>(&self, catalog: &'a Catalog, raw: Option<&str>) -> Vec<&'a CatalogItem> {
        self.cart_recommendations_from_payload_with_rng(catalog, raw, &mut rand::thread_rng())
    }

    pub fn cart_recommendations_from_payload_with_rng<'a, R>(
        &self,
        catalog: &'a Catalog,
        raw: Option<&str>,
        rng: &mut R,
    ) -> Vec<&'a CatalogItem>
    where
        R: Rng + ?Sized,
    {
        match parse_cart_ids(raw) {
            Ok(ids) => self.cart_recommendations_with_rng(catalog, &ids, rng),
            Err(e) => {
                warn!(error = %e, "could not parse cart items, using random sample");
                self.random_sample(catalog, rng)
            }
        }
    }

    /// "You may also like" for the given cart product ids.
    pub fn cart_recommendations<'a, S>(&self, catalog: &'a Catalog, cart_ids: &[S]) -> Vec<&'a CatalogItem>
    where
        S: AsRef<str>,
    {
        self.cart_recommendations_with_rng(catalog, cart_ids, &mut rand::thread_rng())
    }

    /// Same as `cart_recommendations` with an explicit random source for the
    /// fallback sample.
    pub fn cart_recommendations_with_rng<'a, S, R>(
        &self,
        catalog: &'a Catalog,
        cart_ids: &[S],
        rng: &mut R,
    ) -> Vec<&'a CatalogItem>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let in_cart = |item: &CatalogItem| cart_ids.iter().any(|id| id.as_ref() == item.id);

        let cart_items: Vec<&CatalogItem> = catalog.listed().filter(|item| in_cart(*item)).collect();
        if cart_items.is_empty() {
            info!(cart_ids = cart_ids.len(), "no cart products resolved, using random sample");
            return self.random_sample(catalog, rng);
        }

        let basket: BasketProfile = BasketProfile::builder().extend(cart_items.iter().copied()).build();
        let genders = basket.genders();

        let candidates: Vec<&CatalogItem> = catalog
            .listed()
            .filter(|item| !in_cart(*item))
            .filter(|item| genders.is_empty() || item.gender.is_some_and(|g| genders.contains(&g)))
            .collect();
        info!(
            genders = ?genders,
            cart_products = cart_items.len(),
            candidates = candidates.len(),
            "filtered cart recommendation candidates"
        );

        // same listed set the cart was resolved against
        let df = DocumentFrequency::from_sources(catalog.listed());
        let engine = TfIdfEngine::with_policy(&df, self.config.idf_policy);
        Self::rank(&engine, &basket, &candidates, self.config.cart_limit).items()
    }

    /// Uniform sample (without replacement) of published, available items.
    fn random_sample<'a, R>(&self, catalog: &'a Catalog, rng: &mut R) -> Vec<&'a CatalogItem>
    where
        R: Rng + ?Sized,
    {
        let pool: Vec<&CatalogItem> = catalog.listed().collect();
        pool.choose_multiple(rng, self.config.cart_limit).copied().collect()
    }

    /// Rank the whole catalog (minus the target) with both the bag-of-words
    /// baseline and TF-IDF, and report where the two rankings differ.
    pub fn compare<'a>(&self, catalog: &'a Catalog, id: &str) -> Result<ComparisonReport<'a>> {
        let target = catalog.require(id)?;
        let limit = self.config.compare_limit;
        let candidates: Vec<&CatalogItem> = catalog.items().iter().filter(|item| item.id != target.id).collect();

        let old_hits = Self::rank(&BagOfWordsEngine::new(), target, &candidates, limit);

        let df = DocumentFrequency::from_sources(catalog.items());
        let engine = TfIdfEngine::with_policy(&df, self.config.idf_policy);
        let new_hits = Self::rank(&engine, target, &candidates, limit);

        let old_algorithm = AlgorithmResult::from_hits(Algorithm::BagOfWords, &old_hits);
        let new_algorithm = AlgorithmResult::from_hits(Algorithm::TfIdf, &new_hits);
        let differences = rank_differences(&new_algorithm.ids(), &old_algorithm.ids());
        debug!(product = %target.id, differences, "compared recommendation algorithms");

        Ok(ComparisonReport {
            selected_product: target.into(),
            old_algorithm,
            new_algorithm,
            comparison: Disagreement { differences, total_recommendations: limit },
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::Gender;
    use crate::error::RecommendError;

    fn ids(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    fn shop() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("m-top-a", "Top Wear").with_brand("A").with_material("Cotton").with_gender(Gender::Men),
            CatalogItem::new("m-top-b", "Top Wear").with_brand("B").with_material("Linen").with_gender(Gender::Men),
            CatalogItem::new("m-top-a2", "Top Wear").with_brand("A").with_material("Cotton").with_gender(Gender::Men),
            CatalogItem::new("w-top-a", "Top Wear").with_brand("A").with_material("Cotton").with_gender(Gender::Women),
            CatalogItem::new("m-bottom", "Bottom Wear").with_brand("C").with_material("Denim").with_gender(Gender::Men),
            CatalogItem::new("w-bottom", "Bottom Wear").with_brand("C").with_material("Denim").with_gender(Gender::Women),
        ])
    }

    #[test]
    fn similar_stays_in_gender_and_category() {
        let catalog = shop();
        let rec = Recommender::default();
        let similar = rec.similar_products(&catalog, "m-top-a").unwrap();
        assert_eq!(ids(&similar), vec!["m-top-a2", "m-top-b"]);
    }

    #[test]
    fn similar_unknown_id_is_not_found() {
        let rec = Recommender::default();
        assert!(matches!(rec.similar_products(&shop(), "nope"), Err(RecommendError::NotFound(_))));
    }

    #[test]
    fn cart_excludes_cart_items_and_respects_gender() {
        let catalog = shop();
        let rec = Recommender::default();
        let recs = rec.cart_recommendations(&catalog, &["m-top-a"]);
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|i| i.id != "m-top-a"));
        assert!(recs.iter().all(|i| i.gender == Some(Gender::Men)));
        assert_eq!(recs[0].id, "m-top-a2");
    }

    #[test]
    fn mixed_gender_cart_keeps_both() {
        let catalog = shop();
        let rec = Recommender::default();
        let recs = rec.cart_recommendations(&catalog, &["m-bottom", "w-top-a"]);
        assert_eq!(recs.len(), 4);
        assert!(recs.iter().all(|i| i.id != "m-bottom" && i.id != "w-top-a"));
    }

    #[test]
    fn malformed_payload_falls_back_to_sample() {
        let catalog = shop();
        let rec = Recommender::default();
        let mut rng = StdRng::seed_from_u64(7);
        let recs = rec.cart_recommendations_from_payload_with_rng(&catalog, Some("{oops"), &mut rng);
        assert_eq!(recs.len(), catalog.len());

        let recs = rec.cart_recommendations_from_payload_with_rng(&catalog, Some(r#"["m-top-b"]"#), &mut rng);
        assert!(recs.iter().all(|i| i.id != "m-top-b"));
    }

    #[test]
    fn compare_reports_both_rankings() {
        let catalog = shop();
        let rec = Recommender::default();
        let report = rec.compare(&catalog, "m-top-a").unwrap();
        assert_eq!(report.selected_product.category, "Top Wear");
        assert_eq!(report.old_algorithm.recommendations.len(), 4);
        assert_eq!(report.new_algorithm.recommendations.len(), 4);
        assert_eq!(report.comparison.total_recommendations, 4);
        assert!(report.new_algorithm.recommendations.iter().all(|r| r.algorithm == "tf-idf"));
        assert!(report.old_algorithm.recommendations.iter().all(|r| r.algorithm == "bag-of-words"));
        // the identical twin wins under both weightings
        assert_eq!(report.old_algorithm.ids()[0], "m-top-a2");
        assert_eq!(report.new_algorithm.ids()[0], "m-top-a2");
        assert_eq!(
            report.comparison.differences,
            rank_differences(&report.new_algorithm.ids(), &report.old_algorithm.ids())
        );
    }
}
