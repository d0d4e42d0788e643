use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// 不透明的 RGB 颜色，按值比较。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS 颜色字符串，供 canvas 的 fillStyle 使用。
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Color::RED),
            "yellow" => Ok(Color::YELLOW),
            "blue" => Ok(Color::BLUE),
            "green" => Ok(Color::GREEN),
            "white" => Ok(Color::WHITE),
            "black" => Ok(Color::BLACK),
            _ => Err(()),
        }
    }
}

const CLASSIC_COLORS: [Color; 4] = [Color::RED, Color::YELLOW, Color::BLUE, Color::GREEN];

/// 方块正面颜色的候选集合，保证非空。
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.is_empty() {
            return None;
        }
        Some(Self { colors })
    }

    pub fn classic() -> Self {
        Self {
            colors: CLASSIC_COLORS.to_vec(),
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    fn first(&self) -> Color {
        self.colors[0]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

/// 颜色来源：每次从调色板中挑选一个颜色。测试中可替换为确定序列。
pub trait ColorSource {
    fn pick(&mut self, palette: &Palette) -> Color;
}

/// 均匀随机挑选。
pub struct RandomColors {
    rng: SmallRng,
}

impl RandomColors {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}

impl Default for RandomColors {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSource for RandomColors {
    fn pick(&mut self, palette: &Palette) -> Color {
        palette
            .colors()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_else(|| palette.first())
    }
}

/// 按预设顺序给出颜色；序列用完后退回调色板的第一个颜色。
#[derive(Debug, Clone, Default)]
pub struct ScriptedColors {
    queue: VecDeque<Color>,
}

impl ScriptedColors {
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            queue: colors.into_iter().collect(),
        }
    }
}

impl ColorSource for ScriptedColors {
    fn pick(&mut self, palette: &Palette) -> Color {
        self.queue.pop_front().unwrap_or_else(|| palette.first())
    }
}
