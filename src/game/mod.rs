//! 游戏核心逻辑模块（方块、布局、回合状态机）。

pub mod config;
pub mod layout;
pub mod palette;
pub mod session;
pub mod tile;

pub use config::{ColorSpec, GameConfig};
pub use layout::{compute_tile_spacing, GridLayout, Point, Rect};
pub use palette::{Color, ColorSource, Palette, RandomColors, ScriptedColors};
pub use session::{
    FrameStatus, GameEvent, GameSession, GameSnapshot, InputEvent, PairOutcome, TurnPhase,
    MISMATCH_LIMIT,
};
pub use tile::Tile;
