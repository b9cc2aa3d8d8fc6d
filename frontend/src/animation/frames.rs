use std::collections::{BTreeMap, BTreeSet};

use super::error::FrameError;
use crate::config;

pub fn frame_file_name(index: u32) -> String {
    format!("frame_{:0width$}.jpg", index, width = config::FRAME_INDEX_WIDTH)
}

/// Builds the URL of a frame, e.g. `/frames/frame_0007.jpg`.
pub fn frame_path(base: &str, index: u32) -> String {
    format!("{}/{}", base.trim_end_matches('/'), frame_file_name(index))
}

/// Decoded frames of one sequence, keyed by their 1-based index.
///
/// Filled once when preloading settles and never mutated afterwards. Frames
/// that failed to load are remembered so the renderer can fall back to a
/// neighbour instead of asking the network for them again.
#[derive(Debug)]
pub struct FrameCache<T> {
    total: u32,
    frames: BTreeMap<u32, T>,
    failed: BTreeSet<u32>,
}

impl<T> FrameCache<T> {
    pub fn new(total: u32) -> Self {
        Self {
            total: total.max(1),
            frames: BTreeMap::new(),
            failed: BTreeSet::new(),
        }
    }

    /// Collects settled loads, logging every failure.
    pub fn from_results<I>(total: u32, results: I) -> Self
    where
        I: IntoIterator<Item = (u32, Result<T, FrameError>)>,
    {
        let mut cache = Self::new(total);
        for (index, result) in results {
            match result {
                Ok(frame) => cache.insert(index, frame),
                Err(e) => {
                    log::warn!("Frame {} unavailable: {}", index, e);
                    cache.mark_failed(index);
                }
            }
        }
        cache
    }

    pub fn insert(&mut self, index: u32, frame: T) {
        if index == 0 || index > self.total {
            log::warn!("Ignoring frame {} outside 1..={}", index, self.total);
            return;
        }
        self.failed.remove(&index);
        self.frames.insert(index, frame);
    }

    pub fn mark_failed(&mut self, index: u32) {
        if index == 0 || index > self.total || self.frames.contains_key(&index) {
            return;
        }
        self.failed.insert(index);
    }

    #[cfg(test)]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[cfg(test)]
    pub fn get(&self, index: u32) -> Option<&T> {
        self.frames.get(&index)
    }

    #[cfg(test)]
    pub fn is_loaded(&self, index: u32) -> bool {
        self.frames.contains_key(&index)
    }

    pub fn loaded_count(&self) -> usize {
        self.frames.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index to display for `wanted`: the frame itself when it loaded,
    /// otherwise the nearest loaded frame, preferring the lower one on a tie.
    pub fn resolve(&self, wanted: u32) -> Option<u32> {
        let wanted = wanted.clamp(1, self.total);
        if self.frames.contains_key(&wanted) {
            return Some(wanted);
        }
        let below = self.frames.range(..wanted).next_back().map(|(i, _)| *i);
        let above = self.frames.range(wanted + 1..).next().map(|(i, _)| *i);
        match (below, above) {
            (Some(b), Some(a)) => {
                if wanted - b <= a - wanted {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(b), None) => Some(b),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        }
    }
}
