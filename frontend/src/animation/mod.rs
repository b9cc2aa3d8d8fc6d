//! Scroll-driven image sequence: maps page scroll onto a preloaded run of
//! still frames and eases the displayed frame toward the scrolled-to one.
//!
//! Everything except [`preload::load_frame`], [`ticker`] and
//! [`viewport::BrowserViewport`] is host independent and tested natively.

pub mod animator;
pub mod easing;
pub mod error;
pub mod frames;
pub mod preload;
pub mod scroll;
pub mod ticker;
pub mod viewport;

pub use animator::{overlay_visible, Animator, Motion};
pub use frames::{frame_path, FrameCache};
pub use preload::{preload_frames, PreloadProgress};
pub use ticker::{TickLoop, TickSource};
pub use viewport::{BrowserViewport, Viewport};
