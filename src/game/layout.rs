use serde::{Deserialize, Serialize};

pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 400;
pub const TILE_COLUMNS: u32 = 2;
pub const TILE_ROWS: u32 = 1;
pub const TILE_PADDING: u32 = 10;

/// 窗口内的像素坐标。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 左上边界包含在内，右下边界不包含。
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Spacing between neighbouring tile origins. One extra virtual column is
/// reserved for the scoreboard, and `padding` is kept free along the bottom.
pub fn compute_tile_spacing(
    columns: u32,
    rows: u32,
    padding: u32,
    window: (u32, u32),
) -> (u32, u32) {
    let (width, height) = window;
    let dx = width / columns.saturating_add(1);
    let dy = if rows == 0 {
        0
    } else {
        height.saturating_sub(padding) / rows
    };
    (dx, dy)
}

/// 固定网格布局，初始化时计算一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub padding: u32,
    pub spacing: (u32, u32),
    pub tile_size: (u32, u32),
}

impl GridLayout {
    pub fn new(columns: u32, rows: u32, padding: u32, window: (u32, u32)) -> Self {
        let spacing = compute_tile_spacing(columns, rows, padding, window);
        let tile_size = (
            spacing.0.saturating_sub(padding),
            spacing.1.saturating_sub(padding),
        );
        Self {
            columns,
            rows,
            padding,
            spacing,
            tile_size,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            TILE_COLUMNS,
            TILE_ROWS,
            TILE_PADDING,
            (WINDOW_WIDTH, WINDOW_HEIGHT),
        )
    }

    pub fn cell_bounds(&self, x: u32, y: u32) -> Rect {
        let left = self.padding + self.spacing.0 * x;
        let top = self.padding + self.spacing.1 * y;
        Rect::new(
            left as i32,
            top as i32,
            self.tile_size.0 as i32,
            self.tile_size.1 as i32,
        )
    }

    /// 按列优先（先 x 后 y）列出所有格子。
    pub fn cells(&self) -> Vec<Rect> {
        let mut cells = Vec::with_capacity((self.columns * self.rows) as usize);
        for x in 0..self.columns {
            for y in 0..self.rows {
                cells.push(self.cell_bounds(x, y));
            }
        }
        cells
    }
}
