// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
/// Squared Euclidean distance between two equal-length vectors.
///
/// Ranking by the squared distance gives the same order as the true distance,
/// so nearest-match searches never take the square root.
#[inline(always)]
pub fn l2_sq(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimension mismatch");

    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let diff = x - y;
        sum += diff * diff;
    }
    sum
}

/// Euclidean (L2) norm.
#[inline(always)]
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Index of the nearest row in `candidates`, with its squared distance.
///
/// Strict `<` keeps the first (lowest-index) candidate on exact ties.
/// Returns `None` for an empty candidate set.
pub fn nearest<'a, I>(query: &[f64], candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, c) in candidates.into_iter().enumerate() {
        let d = l2_sq(query, c);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((idx, d)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_distance() {
        let a = [10.0, 20.0];
        let b = [12.0, 18.0];
        // (10-12)^2 + (20-18)^2 = 8
        assert_eq!(l2_sq(&a, &b), 8.0);
    }

    #[test]
    fn test_norm() {
        assert_eq!(l2_norm(&[3.0, 4.0]), 5.0);
        assert_eq!(l2_norm(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_nearest_tie_prefers_lowest_index() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 0.0], vec![-1.0, 0.0], vec![1.0, 0.0]];
        // Origin is equidistant from all three
        let (idx, d) = nearest(&[0.0, 0.0], rows.iter().map(|r| r.as_slice())).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(d, 1.0);

        // Exact duplicates at indices 0 and 2
        let (idx, _) = nearest(&[0.9, 0.0], rows.iter().map(|r| r.as_slice())).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_nearest_empty() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(nearest(&[0.0], rows.iter().map(|r| r.as_slice())).is_none());
    }
}
