use super::easing::{FrameEaser, Step};
use super::scroll::{target_frame, ScrollMetrics};
use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Jump straight to the scrolled-to frame.
    Snap,
    /// Ease toward it over several redraws.
    Ease,
}

/// Permission for one convergence loop to advance the animation. Each scroll
/// hands out a fresh ticket and invalidates all older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
}

/// Scroll-driven frame state for one mounted animation.
#[derive(Debug, Clone)]
pub struct Animator {
    easer: FrameEaser,
    motion: Motion,
    epoch: u64,
}

impl Animator {
    pub fn new(total: u32, start: u32, motion: Motion) -> Self {
        Self {
            easer: FrameEaser::new(total, start),
            motion,
            epoch: 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.easer.total()
    }

    pub fn frame(&self) -> u32 {
        self.easer.frame()
    }

    #[cfg(test)]
    pub fn target(&self) -> u32 {
        self.easer.target()
    }

    /// First sync after mounting. A page still at the top keeps showing the
    /// start frame until the first real scroll.
    pub fn on_mount(&mut self, metrics: ScrollMetrics) -> Option<Ticket> {
        if metrics.fraction() == 0.0 {
            return None;
        }
        self.on_scroll(metrics)
    }

    /// Retargets on a scroll or resize. Returns a ticket when a convergence
    /// loop has to run; any loop holding an older ticket is cancelled.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<Ticket> {
        self.easer.set_target(target_frame(metrics.fraction(), self.total()));
        self.epoch += 1;
        match self.motion {
            Motion::Snap => {
                self.easer.snap();
                None
            }
            Motion::Ease if self.easer.is_settled() => None,
            Motion::Ease => Some(Ticket { epoch: self.epoch }),
        }
    }

    /// Lands on the target immediately and retires any outstanding ticket.
    pub fn jump_to_target(&mut self) {
        self.epoch += 1;
        self.easer.snap();
    }

    pub fn tick(&mut self, ticket: Ticket) -> Step {
        if ticket.epoch != self.epoch {
            return Step::Superseded;
        }
        self.easer.tick()
    }
}

/// Whether the overlay copy is visible at `frame`.
pub fn overlay_visible(frame: u32, total: u32) -> bool {
    frame as f64 > total.max(1) as f64 * config::OVERLAY_THRESHOLD
}
