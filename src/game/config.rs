use serde::{Deserialize, Serialize};

use super::palette::{Color, Palette};
use crate::error::GameError;

pub const DEFAULT_REVEAL_DELAY_MS: u32 = 1000;
pub const DEFAULT_FRAME_RATE: u32 = 60;
const MAX_FRAME_RATE: u32 = 240;

/// 调色板条目：既可写颜色名，也可写 RGB 分量。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ColorSpec {
    Named(String),
    Rgb(Color),
}

impl ColorSpec {
    fn resolve(&self) -> Result<Color, GameError> {
        match self {
            ColorSpec::Named(name) => name.parse().map_err(|_| GameError::InvalidConfig {
                reason: format!("unknown colour name `{name}`"),
            }),
            ColorSpec::Rgb(color) => Ok(*color),
        }
    }
}

fn default_palette() -> Vec<ColorSpec> {
    Palette::classic()
        .colors()
        .iter()
        .copied()
        .map(ColorSpec::Rgb)
        .collect()
}

fn default_reveal_delay_ms() -> u32 {
    DEFAULT_REVEAL_DELAY_MS
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

fn default_interruptible_pause() -> bool {
    true
}

/// 运行参数。所有字段都有默认值，宿主可只传入需要覆盖的部分。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_palette")]
    pub palette: Vec<ColorSpec>,
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u32,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// 为 false 时，翻牌停顿期间的关闭请求要等停顿结束才处理。
    #[serde(default = "default_interruptible_pause")]
    pub interruptible_pause: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            palette: default_palette(),
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            frame_rate: DEFAULT_FRAME_RATE,
            interruptible_pause: true,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: Option<&str>) -> Result<Self, GameError> {
        let config: GameConfig = match json {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(json).map_err(|err| GameError::InvalidConfig {
                    reason: err.to_string(),
                })?
            }
            _ => GameConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_palette(mut self, colors: &[Color]) -> Self {
        self.palette = colors.iter().copied().map(ColorSpec::Rgb).collect();
        self
    }

    pub fn with_interruptible_pause(mut self, interruptible: bool) -> Self {
        self.interruptible_pause = interruptible;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            return Err(GameError::InvalidConfig {
                reason: format!(
                    "frame_rate must be between 1 and {MAX_FRAME_RATE}, got {}",
                    self.frame_rate
                ),
            });
        }
        self.resolve_palette().map(|_| ())
    }

    pub fn resolve_palette(&self) -> Result<Palette, GameError> {
        let colors = self
            .palette
            .iter()
            .map(ColorSpec::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(colors).ok_or(GameError::EmptyPalette)
    }

    /// Whole-millisecond timer period; 60 fps rounds down to 16 ms (about 62.5 fps).
    pub fn frame_interval_ms(&self) -> u32 {
        (1000 / self.frame_rate.max(1)).max(1)
    }
}
