use indexmap::IndexMap;
use num::Num;

/// Sparse term vector: token -> weight.
///
/// Tokens that are not in the vector have no entry (they are not stored as
/// zero), which keeps the cosine iteration domain to the tokens actually
/// present on either side.
#[derive(Debug, Clone, PartialEq)]
pub struct TermVector<N>
where
    N: Num + Copy,
{
    weights: IndexMap<Box<str>, N>,
}

impl<N> Default for TermVector<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self { weights: IndexMap::new() }
    }
}

impl<N> TermVector<N>
where
    N: Num + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { weights: IndexMap::with_capacity(capacity) }
    }

    /// Set the weight of `token`, replacing any earlier value.
    #[inline]
    pub fn insert(&mut self, token: &str, weight: N) {
        self.weights.insert(token.into(), weight);
    }

    #[inline]
    pub fn get(&self, token: &str) -> Option<N> {
        self.weights.get(token).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, N)> {
        self.weights.iter().map(|(token, weight)| (token.as_ref(), *weight))
    }
}

impl<N> TermVector<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Euclidean norm over this vector's own tokens
    pub fn norm(&self) -> f64 {
        self.weights
            .values()
            .map(|w| {
                let w: f64 = (*w).into();
                w * w
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Dot product; a token missing on either side contributes 0.
    pub fn dot(&self, other: &TermVector<N>) -> f64 {
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small
            .weights
            .iter()
            .filter_map(|(token, a)| {
                large.weights.get(token).map(|b| {
                    let (a, b): (f64, f64) = ((*a).into(), (*b).into());
                    a * b
                })
            })
            .sum()
    }
}

impl<N> FromIterator<(Box<str>, N)> for TermVector<N>
where
    N: Num + Copy,
{
    fn from_iter<T: IntoIterator<Item = (Box<str>, N)>>(iter: T) -> Self {
        Self { weights: iter.into_iter().collect() }
    }
}
