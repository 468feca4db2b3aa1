//! Zoom window over the dataset rows

use serde::{Deserialize, Serialize};

/// Visible row range for cartesian charts.
///
/// Both ends are inclusive row indices with `start <= end <= len - 1`.
/// Every transition leaves the window unchanged when it cannot keep that
/// invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoomWindow {
    pub start: usize,
    pub end: usize,
}

impl ZoomWindow {
    /// Smallest span that still allows zooming in
    pub const MIN_RANGE: usize = 2;

    /// Window covering every row
    pub fn full(len: usize) -> Self {
        Self {
            start: 0,
            end: len.saturating_sub(1),
        }
    }

    /// Distance between the two ends; zero for an inverted window
    pub fn range(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Number of rows inside the window
    pub fn row_count(&self, len: usize) -> usize {
        self.slice_bounds(len).map(|(s, e)| e - s).unwrap_or(0)
    }

    pub fn is_full(&self, len: usize) -> bool {
        *self == Self::full(len)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.range() > Self::MIN_RANGE
    }

    pub fn can_zoom_out(&self, len: usize) -> bool {
        !self.is_full(len)
    }

    /// Shrink both ends inward by a quarter of the range
    pub fn zoom_in(&self) -> Self {
        let range = self.range();
        if range <= Self::MIN_RANGE {
            return *self;
        }

        let step = range.div_ceil(4);
        let start = self.start + step;
        let end = self.end - step;
        if start >= end {
            return *self;
        }

        Self { start, end }
    }

    /// Grow both ends outward by half of the range, clamped to the data
    pub fn zoom_out(&self, len: usize) -> Self {
        if len == 0 {
            return *self;
        }

        let step = self.range().div_ceil(2);
        Self {
            start: self.start.saturating_sub(step),
            end: self.end.saturating_add(step).min(len - 1),
        }
    }

    /// Window back to the full range
    pub fn reset(&self, len: usize) -> Self {
        Self::full(len)
    }

    /// Whether `other` lies entirely inside this window
    pub fn contains(&self, other: &ZoomWindow) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Rows inside the window; out-of-range ends are clipped to `items`
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.slice_bounds(items.len()) {
            Some((start, end)) => &items[start..end],
            None => &[],
        }
    }

    fn slice_bounds(&self, len: usize) -> Option<(usize, usize)> {
        if len == 0 || self.start >= len || self.start > self.end {
            return None;
        }
        let end = self.end.saturating_add(1).min(len);
        Some((self.start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_window() {
        assert_eq!(ZoomWindow::full(10), ZoomWindow { start: 0, end: 9 });
        assert_eq!(ZoomWindow::full(0), ZoomWindow { start: 0, end: 0 });
        assert!(ZoomWindow::full(10).is_full(10));
        assert!(!ZoomWindow::full(10).can_zoom_out(10));
    }

    #[test]
    fn test_zoom_in_shrinks_by_quarter() {
        let window = ZoomWindow::full(101);
        assert_eq!(window.zoom_in(), ZoomWindow { start: 25, end: 75 });

        let window = ZoomWindow { start: 0, end: 9 };
        assert_eq!(window.zoom_in(), ZoomWindow { start: 3, end: 6 });
    }

    #[test]
    fn test_zoom_in_stops_at_floor() {
        let mut window = ZoomWindow::full(1000);
        for _ in 0..64 {
            window = window.zoom_in();
        }
        assert!(window.range() <= ZoomWindow::MIN_RANGE);
        assert!(!window.can_zoom_in());
        assert_eq!(window.zoom_in(), window);
    }

    #[test]
    fn test_zoom_in_rejects_collapsing_move() {
        let window = ZoomWindow { start: 4, end: 7 };
        // step = 1 leaves [5, 6], still valid
        assert_eq!(window.zoom_in(), ZoomWindow { start: 5, end: 6 });
        let window = ZoomWindow { start: 4, end: 6 };
        assert_eq!(window.zoom_in(), window);
    }

    #[test]
    fn test_zoom_out_clamps() {
        let window = ZoomWindow { start: 2, end: 6 };
        assert_eq!(window.zoom_out(8), ZoomWindow { start: 0, end: 7 });
        assert_eq!(ZoomWindow::full(8).zoom_out(8), ZoomWindow::full(8));
    }

    #[test]
    fn test_zoom_round_trip_widens() {
        let len = 101;
        let original = ZoomWindow::full(len);
        let zoomed = original.zoom_in();
        let restored = zoomed.zoom_out(len);
        assert!(restored.contains(&original));

        let original = ZoomWindow { start: 20, end: 60 };
        let zoomed = original.zoom_in();
        let restored = zoomed.zoom_out(len);
        assert!(restored.contains(&original));
        assert!(restored.contains(&zoomed));
    }

    #[test]
    fn test_round_trip_of_uneven_range_loses_edges() {
        // range 9: in by 3 to [3, 6], out by 2 to [1, 8]
        let len = 10;
        let original = ZoomWindow { start: 0, end: 9 };
        let zoomed = original.zoom_in();
        assert_eq!(zoomed, ZoomWindow { start: 3, end: 6 });

        let restored = zoomed.zoom_out(len);
        assert_eq!(restored, ZoomWindow { start: 1, end: 8 });
        assert!(restored.contains(&zoomed));
        assert!(!restored.contains(&original));
        assert!(restored.zoom_out(len).contains(&original));
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let items: Vec<usize> = (0..10).collect();
        let window = ZoomWindow { start: 7, end: 3 };
        assert_eq!(window.range(), 0);
        assert!(!window.can_zoom_in());
        assert_eq!(window.zoom_in(), window);
        assert!(window.slice(&items).is_empty());
        assert_eq!(window.row_count(10), 0);
        assert_eq!(window.reset(10), ZoomWindow::full(10));

        let wide = ZoomWindow { start: 0, end: usize::MAX };
        assert_eq!(wide.slice(&items).len(), 10);
        assert_eq!(wide.zoom_out(10), ZoomWindow::full(10));
    }

    #[test]
    fn test_zoom_out_always_contains_previous() {
        let len = 50;
        let mut window = ZoomWindow { start: 20, end: 23 };
        for _ in 0..10 {
            let wider = window.zoom_out(len);
            assert!(wider.contains(&window));
            window = wider;
        }
        assert!(window.is_full(len));
    }

    #[test]
    fn test_reset() {
        let window = ZoomWindow { start: 3, end: 5 };
        assert_eq!(window.reset(20), ZoomWindow::full(20));
    }

    #[test]
    fn test_slice_is_inclusive() {
        let items: Vec<usize> = (0..10).collect();
        let window = ZoomWindow { start: 2, end: 4 };
        assert_eq!(window.slice(&items), &[2, 3, 4]);
        assert_eq!(ZoomWindow::full(10).slice(&items).len(), 10);
        assert_eq!(window.row_count(10), 3);

        let empty: Vec<usize> = Vec::new();
        assert!(ZoomWindow::full(0).slice(&empty).is_empty());
    }
}
