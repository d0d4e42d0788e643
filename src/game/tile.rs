use serde::{Deserialize, Serialize};

use super::layout::{Point, Rect};
use super::palette::Color;
use crate::render::Surface;

/// 一块可点击的方块：背面朝上时显示背面颜色，翻开后显示正面颜色。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tile {
    bounds: Rect,
    hidden: bool,
    front_color: Color,
    back_color: Color,
}

impl Tile {
    pub fn new(bounds: Rect, front_color: Color, back_color: Color) -> Self {
        Self {
            bounds,
            hidden: true,
            front_color,
            back_color,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    pub fn flip(&mut self) {
        self.hidden = !self.hidden;
    }

    pub fn is_face_down(&self) -> bool {
        self.hidden
    }

    pub fn front_color(&self) -> Color {
        self.front_color
    }

    pub fn set_front_color(&mut self, color: Color) {
        self.front_color = color;
    }

    pub fn matches(&self, other: &Tile) -> bool {
        self.front_color == other.front_color
    }

    pub fn visible_color(&self) -> Color {
        if self.hidden {
            self.back_color
        } else {
            self.front_color
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds, self.visible_color());
    }
}
