use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::layout::{GridLayout, Point, WINDOW_HEIGHT, WINDOW_WIDTH};
use super::palette::{Color, ColorSource, Palette, RandomColors};
use super::tile::Tile;
use crate::error::GameError;
use crate::render::Surface;

pub const MISMATCH_LIMIT: u32 = 5;
pub const BACKGROUND_COLOR: Color = Color::BLACK;
pub const HIDDEN_COLOR: Color = Color::WHITE;
pub const LABEL_COLOR: Color = Color::WHITE;
pub const MATCHED_LABEL_TOP: f64 = 0.0;
pub const MISMATCHED_LABEL_TOP: f64 = 50.0;

/// 回合阶段。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum TurnPhase {
    Idle,
    OneRevealed,
    /// 两块已翻开。`deadline` 为空表示尚未比较；比较完成后记录停顿结束的时间戳（毫秒）。
    Resolving {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deadline: Option<f64>,
    },
    GameOver,
}

impl Default for TurnPhase {
    fn default() -> Self {
        TurnPhase::Idle
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum InputEvent {
    Press { x: i32, y: i32 },
    Close,
}

impl InputEvent {
    pub fn press(point: Point) -> Self {
        InputEvent::Press {
            x: point.x,
            y: point.y,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PairOutcome {
    Matched,
    Mismatched,
}

/// 游戏事件流，由宿主层取出后写入日志。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum GameEvent {
    TileRevealed {
        tile: usize,
        color: Color,
    },
    PairResolved {
        outcome: PairOutcome,
        colors: [Color; 2],
        match_count: u32,
        mismatch_count: u32,
    },
    GameOver {
        match_count: u32,
        mismatch_count: u32,
    },
    WindowClosed,
}

/// 单帧处理结果。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FrameStatus {
    Drawn,
    Paused,
    Frozen,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub tiles: Vec<Tile>,
    pub match_count: u32,
    pub mismatch_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revealed: Vec<usize>,
    pub phase: TurnPhase,
    pub running: bool,
    pub window_closed: bool,
}

/// 一局游戏：拥有全部方块、计分、已翻开集合与输入队列。
pub struct GameSession<C: ColorSource = RandomColors> {
    tiles: Vec<Tile>,
    palette: Palette,
    colors: C,
    window: (u32, u32),
    match_count: u32,
    mismatch_count: u32,
    revealed: Vec<usize>,
    phase: TurnPhase,
    running: bool,
    window_closed: bool,
    reveal_delay_ms: f64,
    interruptible_pause: bool,
    input: VecDeque<InputEvent>,
    event_log: Vec<GameEvent>,
}

impl<C: ColorSource> GameSession<C> {
    pub fn new(config: &GameConfig, mut colors: C) -> Result<Self, GameError> {
        config.validate()?;
        let palette = config.resolve_palette()?;
        let tiles = GridLayout::standard()
            .cells()
            .into_iter()
            .map(|bounds| Tile::new(bounds, colors.pick(&palette), HIDDEN_COLOR))
            .collect();

        Ok(Self {
            tiles,
            palette,
            colors,
            window: (WINDOW_WIDTH, WINDOW_HEIGHT),
            match_count: 0,
            mismatch_count: 0,
            revealed: Vec::new(),
            phase: TurnPhase::default(),
            running: true,
            window_closed: false,
            reveal_delay_ms: f64::from(config.reveal_delay_ms),
            interruptible_pause: config.interruptible_pause,
            input: VecDeque::new(),
            event_log: Vec::new(),
        })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    pub fn mismatch_count(&self) -> u32 {
        self.mismatch_count
    }

    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_closed(&self) -> bool {
        self.window_closed
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, TurnPhase::Resolving { deadline: Some(_) })
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn push_input(&mut self, event: InputEvent) {
        if !self.window_closed {
            self.input.push_back(event);
        }
    }

    pub fn record_event(&mut self, event: GameEvent) {
        self.event_log.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            tiles: self.tiles.clone(),
            match_count: self.match_count,
            mismatch_count: self.mismatch_count,
            revealed: self.revealed.clone(),
            phase: self.phase,
            running: self.running,
            window_closed: self.window_closed,
        }
    }

    /// 执行一帧：处理输入，判断是否结束，绘制，再结算待比较的一对方块。
    pub fn frame(&mut self, now: f64, surface: &mut dyn Surface) -> FrameStatus {
        if self.window_closed {
            return FrameStatus::Closed;
        }

        self.release_pause(now);
        if self.is_paused() && !self.interruptible_pause {
            return FrameStatus::Paused;
        }

        self.handle_events();
        if self.window_closed {
            return FrameStatus::Closed;
        }
        if !self.running {
            return FrameStatus::Frozen;
        }
        if self.is_paused() {
            return FrameStatus::Paused;
        }

        self.decide_continue();
        self.draw(surface);
        self.resolve_pending(now);
        FrameStatus::Drawn
    }

    fn handle_events(&mut self) {
        while let Some(event) = self.input.pop_front() {
            match event {
                InputEvent::Close => {
                    self.window_closed = true;
                    self.input.clear();
                    self.record_event(GameEvent::WindowClosed);
                    return;
                }
                InputEvent::Press { x, y } => {
                    if self.running {
                        self.handle_click(Point::new(x, y));
                    }
                }
            }
        }
    }

    /// 翻开第一块包含该点且背面朝上的方块。返回是否有方块响应。
    pub fn handle_click(&mut self, point: Point) -> bool {
        if !self.running || !matches!(self.phase, TurnPhase::Idle | TurnPhase::OneRevealed) {
            return false;
        }

        let Some(index) = self
            .tiles
            .iter()
            .position(|tile| tile.hit_test(point) && tile.is_face_down())
        else {
            return false;
        };

        let tile = &mut self.tiles[index];
        tile.flip();
        let color = tile.front_color();
        self.revealed.push(index);
        self.record_event(GameEvent::TileRevealed { tile: index, color });

        self.phase = if self.revealed.len() >= 2 {
            TurnPhase::Resolving { deadline: None }
        } else {
            TurnPhase::OneRevealed
        };
        true
    }

    pub fn decide_continue(&mut self) {
        if self.running && self.mismatch_count >= MISMATCH_LIMIT {
            self.running = false;
            self.phase = TurnPhase::GameOver;
            self.record_event(GameEvent::GameOver {
                match_count: self.match_count,
                mismatch_count: self.mismatch_count,
            });
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear(BACKGROUND_COLOR);
        for tile in &self.tiles {
            tile.render(surface);
        }

        let right = f64::from(surface.size().0);
        surface.draw_text_right(
            &format!("Matched: {}", self.match_count),
            right,
            MATCHED_LABEL_TOP,
            LABEL_COLOR,
        );
        surface.draw_text_right(
            &format!("Mismatched: {}", self.mismatch_count),
            right,
            MISMATCHED_LABEL_TOP,
            LABEL_COLOR,
        );
    }

    /// 比较两块已翻开的方块，计分，重新分配颜色并翻回背面，然后进入停顿。
    pub fn resolve_pending(&mut self, now: f64) -> Option<PairOutcome> {
        if self.revealed.len() < 2 {
            return None;
        }

        let revealed = std::mem::take(&mut self.revealed);
        let (first, second) = (revealed[0], revealed[1]);
        let colors = [
            self.tiles[first].front_color(),
            self.tiles[second].front_color(),
        ];
        let outcome = if self.tiles[first].matches(&self.tiles[second]) {
            self.match_count += 1;
            PairOutcome::Matched
        } else {
            self.mismatch_count += 1;
            PairOutcome::Mismatched
        };

        for index in revealed {
            let color = self.colors.pick(&self.palette);
            let tile = &mut self.tiles[index];
            tile.set_front_color(color);
            tile.flip();
        }

        self.phase = TurnPhase::Resolving {
            deadline: Some(now + self.reveal_delay_ms),
        };
        self.record_event(GameEvent::PairResolved {
            outcome,
            colors,
            match_count: self.match_count,
            mismatch_count: self.mismatch_count,
        });
        Some(outcome)
    }

    fn release_pause(&mut self, now: f64) {
        if let TurnPhase::Resolving {
            deadline: Some(deadline),
        } = self.phase
        {
            if now >= deadline {
                self.phase = if self.mismatch_count >= MISMATCH_LIMIT {
                    TurnPhase::GameOver
                } else {
                    TurnPhase::Idle
                };
            }
        }
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window
    }
}
