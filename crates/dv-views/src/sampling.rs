//! Fixed-stride downsampling for large series

/// Keep every `ceil(len / max_points)`-th item.
///
/// The last item is always kept, so the result holds at most
/// `max_points + 1` items. Sequences already within the limit, and a limit
/// of zero, return the input unchanged.
pub fn downsample<T: Clone>(items: &[T], max_points: usize) -> Vec<T> {
    if max_points == 0 || items.len() <= max_points {
        return items.to_vec();
    }

    let stride = items.len().div_ceil(max_points);
    let last = items.len() - 1;

    let mut sampled: Vec<T> = items.iter().step_by(stride).cloned().collect();
    if last % stride != 0 {
        sampled.push(items[last].clone());
    }

    tracing::debug!("Downsampled {} points to {} (stride {})", items.len(), sampled.len(), stride);
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sequences_are_untouched() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(downsample(&items, 10), items);
        assert_eq!(downsample(&items, 50), items);
        assert_eq!(downsample(&items, 0), items);
        assert!(downsample::<u32>(&[], 3).is_empty());
    }

    #[test]
    fn test_stride_and_last_point() {
        let items: Vec<u32> = (0..10).collect();
        // stride ceil(10/4) = 3 -> 0,3,6,9; 9 already aligned
        assert_eq!(downsample(&items, 4), vec![0, 3, 6, 9]);

        let items: Vec<u32> = (0..11).collect();
        // stride 3 -> 0,3,6,9 then the forced 10
        assert_eq!(downsample(&items, 4), vec![0, 3, 6, 9, 10]);
    }

    #[test]
    fn test_bounds_hold_for_many_sizes() {
        for len in 1..400usize {
            let items: Vec<usize> = (0..len).collect();
            for max_points in 1..40usize {
                let sampled = downsample(&items, max_points);
                assert_eq!(sampled.last(), items.last());
                assert!(sampled.len() <= max_points + 1, "len {len}, max {max_points}");
                assert!(sampled.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
