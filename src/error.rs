use std::fmt;

use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::JsValue;

/// 宿主边界上的错误。游戏核心逻辑本身不会失败。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum GameError {
    WindowUnavailable,
    DocumentUnavailable,
    CanvasUnavailable { id: String },
    ContextUnavailable,
    ListenerFailed { event: String },
    InvalidConfig { reason: String },
    EmptyPalette,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WindowUnavailable => write!(f, "no global window"),
            GameError::DocumentUnavailable => write!(f, "window has no document"),
            GameError::CanvasUnavailable { id } => {
                write!(f, "could not acquire canvas element `{id}`")
            }
            GameError::ContextUnavailable => write!(f, "canvas has no 2d rendering context"),
            GameError::ListenerFailed { event } => {
                write!(f, "failed to install `{event}` listener")
            }
            GameError::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            GameError::EmptyPalette => write!(f, "palette must contain at least one colour"),
        }
    }
}

impl std::error::Error for GameError {}

pub fn to_js_error(error: GameError) -> JsValue {
    to_value(&error).unwrap_or_else(|_| JsValue::from_str(&error.to_string()))
}
