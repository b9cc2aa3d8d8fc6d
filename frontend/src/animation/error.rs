use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("Failed to load frame {index} from {path}")]
    LoadFailed { index: u32, path: String },
    #[error("Load of frame {index} was dropped before it settled")]
    Cancelled { index: u32 },
    #[error("No browser window available")]
    NoWindow,
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for FrameError {
    fn from(value: JsValue) -> Self {
        FrameError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
