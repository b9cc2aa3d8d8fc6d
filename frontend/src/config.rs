use crate::animation::TickSource;

pub const DEFAULT_FRAMES_BASE: &str = "/frames";

/// Directory the frame sequence is served from. Override at build time with
/// `PETAL_FRAMES_BASE`, e.g. when the frames live on a CDN.
pub fn get_frames_base() -> String {
    option_env!("PETAL_FRAMES_BASE")
        .unwrap_or(DEFAULT_FRAMES_BASE)
        .trim_end_matches('/')
        .to_string()
}

/// Drives the easing loop from a fixed-rate timer when
/// `PETAL_TICK_INTERVAL_MS` is set at build time, from animation frames
/// otherwise.
pub fn get_tick_source() -> TickSource {
    tick_source_from(option_env!("PETAL_TICK_INTERVAL_MS"))
}

fn tick_source_from(raw: Option<&str>) -> TickSource {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => TickSource::AnimationFrame,
        Some(raw) => match raw.parse::<u32>() {
            Ok(period_ms) if period_ms > 0 => TickSource::Interval(period_ms),
            _ => {
                log::warn!("Ignoring tick interval {:?}, using animation frames", raw);
                TickSource::AnimationFrame
            }
        },
    }
}

// Frame sequence shown on the Brief tab
pub const BRIEF_TOTAL_FRAMES: u32 = 121;

// Frame files are named frame_0001.jpg .. frame_9999.jpg
pub const FRAME_INDEX_WIDTH: usize = 4;

pub const SMOOTHING_FACTOR: f64 = 0.15;
pub const SETTLE_EPSILON: f64 = 0.01;

// Fraction of the sequence after which the overlay copy fades in
pub const OVERLAY_THRESHOLD: f64 = 0.3;

pub const LOGO_SRC: &str = "/Icon-Recovered-02-01.svg";
pub const DIAGRAM_SRC: &str = "/PETAL-diagram.svg";
