//! Downsampling of dense route polylines into a few probe points.

use crate::model::Coordinate;

/// Stride used when the caller has no preference.
pub const DEFAULT_STEP: usize = 25;

/// Positions of the probe points for a route of `len` points.
///
/// Every `step`-th index starting at 0, plus the final index when the stride
/// does not land on it. `step` below 1 is treated as 1.
pub fn sample_indices(len: usize, step: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }

    let step = step.max(1);
    let mut indices: Vec<usize> = (0..len).step_by(step).collect();

    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }

    indices
}

/// Probe points for `points`, in route order.
pub fn sample(points: &[Coordinate], step: usize) -> Vec<Coordinate> {
    sample_indices(points.len(), step)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Coordinate> {
        (0..n)
            .map(|i| Coordinate::new(51.0 + i as f64 * 0.01, -114.0))
            .collect()
    }

    #[test]
    fn empty_route_yields_nothing() {
        assert!(sample(&[], 25).is_empty());
    }

    #[test]
    fn single_point_route() {
        let points = line(1);
        assert_eq!(sample(&points, 25), points);
        assert_eq!(sample_indices(1, 1), vec![0]);
    }

    #[test]
    fn always_includes_first_and_last() {
        for len in 1..60 {
            for step in 1..70 {
                let idx = sample_indices(len, step);
                assert_eq!(idx.first(), Some(&0), "len={len} step={step}");
                assert_eq!(idx.last(), Some(&(len - 1)), "len={len} step={step}");
                assert!(idx.len() <= len.div_ceil(step) + 1);
                assert!(idx.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn large_step_keeps_only_endpoints() {
        assert_eq!(sample_indices(10, 10), vec![0, 9]);
        assert_eq!(sample_indices(10, 500), vec![0, 9]);
    }

    #[test]
    fn zero_step_is_clamped() {
        assert_eq!(sample_indices(3, 0), vec![0, 1, 2]);
    }

    #[test]
    fn exact_stride_does_not_duplicate_last() {
        assert_eq!(sample_indices(401, 200), vec![0, 200, 400]);

        let points = line(401);
        let sampled = sample(&points, 200);
        assert_eq!(sampled, vec![points[0], points[200], points[400]]);
    }

    #[test]
    fn uneven_stride_appends_destination() {
        assert_eq!(sample_indices(60, 25), vec![0, 25, 50, 59]);
    }
}
