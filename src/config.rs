use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// How a negative inverse document frequency is treated.
///
/// `idf = ln(N / df)` only goes negative when `df > N`, which the cart
/// pseudo-corpus can produce. `Signed` keeps the raw value, `ClampZero`
/// floors it at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdfPolicy {
    #[default]
    Signed,
    ClampZero,
}

impl FromStr for IdfPolicy {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "signed" => Ok(IdfPolicy::Signed),
            "clamp" | "clamp_zero" | "clamp-zero" => Ok(IdfPolicy::ClampZero),
            other => Err(RecommendError::Config(format!(
                "unknown idf policy `{other}` (expected `signed` or `clamp`)"
            ))),
        }
    }
}

/// Recommender settings.
///
/// Defaults match the storefront's product routes; every field can be
/// overridden from the environment with [`RecommenderConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// top-N for single-item similarity
    pub similar_limit: usize,
    /// top-N for cart recommendations and the random fallback
    pub cart_limit: usize,
    /// top-N per algorithm in comparison mode
    pub compare_limit: usize,
    pub new_arrivals_limit: usize,
    pub idf_policy: IdfPolicy,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            similar_limit: 4,
            cart_limit: 8,
            compare_limit: 4,
            new_arrivals_limit: 8,
            idf_policy: IdfPolicy::Signed,
        }
    }
}

impl RecommenderConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Recognized variables: `RECOMMENDER_SIMILAR_LIMIT`, `RECOMMENDER_CART_LIMIT`,
    /// `RECOMMENDER_COMPARE_LIMIT`, `RECOMMENDER_NEW_ARRIVALS_LIMIT`,
    /// `RECOMMENDER_IDF_POLICY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            similar_limit: parse_var(&lookup, "RECOMMENDER_SIMILAR_LIMIT", defaults.similar_limit)?,
            cart_limit: parse_var(&lookup, "RECOMMENDER_CART_LIMIT", defaults.cart_limit)?,
            compare_limit: parse_var(&lookup, "RECOMMENDER_COMPARE_LIMIT", defaults.compare_limit)?,
            new_arrivals_limit: parse_var(
                &lookup,
                "RECOMMENDER_NEW_ARRIVALS_LIMIT",
                defaults.new_arrivals_limit,
            )?,
            idf_policy: match lookup("RECOMMENDER_IDF_POLICY") {
                Some(raw) => raw.parse()?,
                None => defaults.idf_policy,
            },
        })
    }
}

fn parse_var<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|e| RecommendError::Config(format!("{key}={raw}: {e}"))),
        None => Ok(default),
    }
}
