/// Snapshot of the page's scroll geometry, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            document_height,
            viewport_height,
        }
    }

    pub fn scrollable_range(&self) -> f64 {
        self.document_height - self.viewport_height
    }

    /// Scroll progress in `[0, 1]`.
    ///
    /// A page that cannot scroll (range <= 0) or reports non-finite geometry
    /// is treated as sitting at the top: the fraction is 0, never NaN.
    pub fn fraction(&self) -> f64 {
        let range = self.scrollable_range();
        if !range.is_finite() || range <= 0.0 || !self.scroll_y.is_finite() {
            return 0.0;
        }
        (self.scroll_y / range).clamp(0.0, 1.0)
    }
}

/// Maps a scroll fraction to a 1-based frame index in `[1, total_frames]`.
pub fn target_frame(fraction: f64, total_frames: u32) -> u32 {
    let total = total_frames.max(1);
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    ((fraction * total as f64).round() as u32).clamp(1, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_page_maps_to_first_frame() {
        let metrics = ScrollMetrics::new(0.0, 3000.0, 1000.0);
        assert_eq!(metrics.fraction(), 0.0);
        assert_eq!(target_frame(metrics.fraction(), 121), 1);
    }

    #[test]
    fn bottom_of_page_maps_to_last_frame() {
        let metrics = ScrollMetrics::new(2000.0, 3000.0, 1000.0);
        assert_eq!(metrics.fraction(), 1.0);
        assert_eq!(target_frame(metrics.fraction(), 121), 121);
    }

    #[test]
    fn halfway_rounds_to_nearest_frame() {
        let metrics = ScrollMetrics::new(1000.0, 3000.0, 1000.0);
        assert_eq!(metrics.fraction(), 0.5);
        // 0.5 * 121 = 60.5 rounds away from zero
        assert_eq!(target_frame(metrics.fraction(), 121), 61);
        assert_eq!(target_frame(0.5, 10), 5);
    }

    #[test]
    fn page_shorter_than_viewport_stays_on_first_frame() {
        let flush = ScrollMetrics::new(0.0, 1000.0, 1000.0);
        assert_eq!(flush.fraction(), 0.0);
        assert_eq!(target_frame(flush.fraction(), 121), 1);

        let short = ScrollMetrics::new(40.0, 800.0, 1000.0);
        assert_eq!(short.fraction(), 0.0);
    }

    #[test]
    fn non_finite_geometry_is_treated_as_top() {
        assert_eq!(ScrollMetrics::new(f64::NAN, 3000.0, 1000.0).fraction(), 0.0);
        assert_eq!(ScrollMetrics::new(10.0, f64::INFINITY, 1000.0).fraction(), 0.0);
        assert_eq!(target_frame(f64::NAN, 121), 1);
        assert_eq!(target_frame(f64::INFINITY, 121), 1);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(ScrollMetrics::new(2600.0, 3000.0, 1000.0).fraction(), 1.0);
        assert_eq!(ScrollMetrics::new(-50.0, 3000.0, 1000.0).fraction(), 0.0);
    }

    #[test]
    fn mapped_frame_stays_in_range() {
        for total in [1u32, 2, 3, 10, 121, 500] {
            for step in 0..=200 {
                let fraction = step as f64 / 200.0;
                let frame = target_frame(fraction, total);
                assert!((1..=total).contains(&frame), "total={} fraction={} frame={}", total, fraction, frame);
            }
            assert_eq!(target_frame(0.0, total), 1);
            assert_eq!(target_frame(1.0, total), total);
        }
    }

    #[test]
    fn zero_frames_behaves_like_one() {
        assert_eq!(target_frame(0.7, 0), 1);
    }
}
