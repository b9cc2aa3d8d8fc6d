use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Still travelling, schedule another tick.
    Moving,
    /// Reached the target exactly.
    Settled,
    /// A newer scroll started its own convergence; this loop must stop.
    Superseded,
}

/// Exponential smoothing of the displayed frame toward the scroll target.
///
/// Every tick moves `factor` of the remaining distance. Once the distance
/// drops below `epsilon` the displayed frame snaps onto the target.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEaser {
    total: u32,
    displayed: f64,
    target: u32,
    factor: f64,
    epsilon: f64,
}

impl FrameEaser {
    pub fn new(total: u32, start: u32) -> Self {
        let total = total.max(1);
        let start = start.clamp(1, total);
        Self {
            total,
            displayed: start as f64,
            target: start,
            factor: config::SMOOTHING_FACTOR,
            epsilon: config::SETTLE_EPSILON,
        }
    }

    #[cfg(test)]
    pub fn with_smoothing(mut self, factor: f64, epsilon: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            self.factor = factor.min(1.0);
        }
        if epsilon.is_finite() && epsilon > 0.0 {
            self.epsilon = epsilon;
        }
        self
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    #[cfg(test)]
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    #[cfg(test)]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Displayed frame rounded to a renderable index.
    pub fn frame(&self) -> u32 {
        (self.displayed.round() as u32).clamp(1, self.total)
    }

    pub fn set_target(&mut self, target: u32) {
        self.target = target.clamp(1, self.total);
    }

    pub fn snap(&mut self) {
        self.displayed = self.target as f64;
    }

    pub fn is_settled(&self) -> bool {
        self.displayed == self.target as f64
    }

    pub fn tick(&mut self) -> Step {
        let target = self.target as f64;
        if (target - self.displayed).abs() < self.epsilon {
            self.displayed = target;
            return Step::Settled;
        }
        self.displayed += (target - self.displayed) * self.factor;
        if (target - self.displayed).abs() < self.epsilon {
            self.displayed = target;
            Step::Settled
        } else {
            Step::Moving
        }
    }

    /// Upper bound on the ticks needed to settle from the current position.
    #[cfg(test)]
    pub fn settle_bound(&self) -> u32 {
        let distance = (self.target as f64 - self.displayed).abs();
        if distance < self.epsilon {
            return 1;
        }
        if self.factor >= 1.0 {
            return 1;
        }
        let ratio = (distance / self.epsilon).ln() / -(1.0 - self.factor).ln();
        ratio.ceil() as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_settle(easer: &mut FrameEaser) -> u32 {
        let mut ticks = 0;
        loop {
            ticks += 1;
            if easer.tick() == Step::Settled {
                return ticks;
            }
            assert!(ticks < 10_000, "easer never settled");
        }
    }

    #[test]
    fn first_tick_moves_fifteen_percent() {
        let mut easer = FrameEaser::new(121, 1);
        easer.set_target(101);
        assert_eq!(easer.tick(), Step::Moving);
        assert!((easer.displayed() - 16.0).abs() < 1e-9);
        assert_eq!(easer.frame(), 16);
    }

    #[test]
    fn settles_exactly_on_target() {
        let mut easer = FrameEaser::new(121, 1);
        easer.set_target(121);
        run_to_settle(&mut easer);
        assert_eq!(easer.displayed(), 121.0);
        assert!(easer.is_settled());
        assert_eq!(easer.tick(), Step::Settled);
    }

    #[test]
    fn converges_within_bound_for_every_pair() {
        let total = 121;
        for start in 1..=total {
            for target in (1..=total).step_by(7) {
                let mut easer = FrameEaser::new(total, start);
                easer.set_target(target);
                let bound = easer.settle_bound();
                let ticks = run_to_settle(&mut easer);
                assert!(ticks <= bound, "start={} target={} ticks={} bound={}", start, target, ticks, bound);
                assert_eq!(easer.frame(), target);
            }
        }
    }

    #[test]
    fn full_sweep_needs_under_sixty_ticks() {
        let mut easer = FrameEaser::new(121, 1);
        easer.set_target(121);
        assert!(run_to_settle(&mut easer) <= 60);
    }

    #[test]
    fn targets_and_start_are_clamped() {
        let mut easer = FrameEaser::new(10, 0);
        assert_eq!(easer.frame(), 1);
        easer.set_target(99);
        assert_eq!(easer.target(), 10);
        easer.snap();
        assert_eq!(easer.frame(), 10);

        let late = FrameEaser::new(10, 42);
        assert_eq!(late.frame(), 10);
    }

    #[test]
    fn displayed_never_leaves_range_while_easing() {
        let mut easer = FrameEaser::new(121, 121);
        easer.set_target(1);
        while easer.tick() == Step::Moving {
            assert!(easer.displayed() >= 1.0 && easer.displayed() <= 121.0);
            assert!((1..=121).contains(&easer.frame()));
        }
    }

    #[test]
    fn invalid_smoothing_keeps_defaults() {
        let easer = FrameEaser::new(5, 1).with_smoothing(f64::NAN, -1.0);
        let mut reference = FrameEaser::new(5, 1);
        assert_eq!(easer, reference);
        reference = reference.with_smoothing(1.0, 0.5);
        reference.set_target(5);
        assert_eq!(reference.tick(), Step::Settled);
    }
}
