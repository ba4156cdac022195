use num::Num;

use crate::vectorizer::term::TermVector;

/// Cosine similarity
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
///
/// The dot product runs over the union of both token sets (a token missing
/// on one side contributes 0). If either norm is 0, or the vectors share no
/// token, the similarity is +0.0.
pub fn cosine_similarity<N>(a: &TermVector<N>, b: &TermVector<N>) -> f64
where
    N: Num + Copy + Into<f64>,
{
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot = a.dot(b);
    // an empty sum is -0.0, which would sort below the +0.0 of a blank item
    if dot == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector<N: Num + Copy>(pairs: &[(&str, N)]) -> TermVector<N> {
        let mut v = TermVector::new();
        for (t, w) in pairs {
            v.insert(t, *w);
        }
        v
    }

    #[test]
    fn identical_vectors_score_one() {
        let a = vector(&[("top", 0.4), ("wear", 1.2), ("men", 0.7)]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_vectors_score_zero() {
        let a = vector(&[("top", 1.0), ("men", 2.0)]);
        let b = vector(&[("bottom", 3.0), ("women", 1.0)]);
        let score = cosine_similarity(&a, &b);
        assert_eq!(score, 0.0);
        assert!(score.is_sign_positive());
    }

    #[test]
    fn disjoint_and_blank_score_the_same_zero() {
        let a = vector(&[("top", 1.0), ("men", 2.0)]);
        let disjoint = vector(&[("hats", 1.0), ("women", 1.0)]);
        let blank = TermVector::<f64>::new();
        let (d, b) = (cosine_similarity(&a, &disjoint), cosine_similarity(&a, &blank));
        assert_eq!(d.to_bits(), b.to_bits());
        assert_eq!(d.total_cmp(&b), std::cmp::Ordering::Equal);
    }

    #[test]
    fn symmetric() {
        let a = vector(&[("top", 1.0), ("men", 2.0), ("a", 0.5)]);
        let b = vector(&[("top", 3.0), ("women", 1.0)]);
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn zero_norm_is_zero_not_nan() {
        let empty = TermVector::<f64>::new();
        let zeros = vector(&[("wear", 0.0)]);
        let a = vector(&[("wear", 1.0)]);
        assert_eq!(cosine_similarity(&empty, &empty), 0.0);
        assert_eq!(cosine_similarity(&empty, &a), 0.0);
        assert_eq!(cosine_similarity(&zeros, &a), 0.0);
    }

    #[test]
    fn integer_weights() {
        let a = vector(&[("x", 1u32), ("y", 1)]);
        let b = vector(&[("x", 1u32)]);
        assert!((cosine_similarity(&a, &b) - 1.0 / 2f64.sqrt()).abs() < 1e-12);
    }
}
