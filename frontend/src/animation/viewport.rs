use web_sys::Window;

use super::scroll::ScrollMetrics;

/// Read-only view of the document the animation scrolls through.
pub trait Viewport {
    fn scroll_y(&self) -> f64;
    fn document_height(&self) -> f64;
    fn viewport_height(&self) -> f64;

    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.scroll_y(), self.document_height(), self.viewport_height())
    }
}

/// `window.scrollY`, `documentElement.scrollHeight` and `window.innerHeight`.
#[derive(Clone)]
pub struct BrowserViewport {
    window: Window,
}

impl BrowserViewport {
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl Viewport for BrowserViewport {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn document_height(&self) -> f64 {
        self.window
            .document()
            .and_then(|doc| doc.document_element())
            .map(|el| el.scroll_height() as f64)
            .unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
pub(crate) struct FixedViewport {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

#[cfg(test)]
impl Viewport for FixedViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}
