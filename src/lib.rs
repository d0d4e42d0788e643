pub mod error;
pub mod game;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Date;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

pub use error::{to_js_error, GameError};
pub use game::{
    compute_tile_spacing, Color, ColorSource, FrameStatus, GameConfig, GameEvent, GameSession,
    GameSnapshot, InputEvent, PairOutcome, Palette, Point, RandomColors, Rect, ScriptedColors,
    Tile, TurnPhase,
};
pub use render::{CanvasSurface, Surface};

pub const WINDOW_TITLE: &str = "Color Match";
/// 页面关闭信号，只监听 `pagehide`。
pub const CLOSE_EVENT: &str = "pagehide";

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::TileRevealed { .. } => {}
        GameEvent::PairResolved {
            outcome,
            colors,
            match_count,
            mismatch_count,
        } => {
            let message = format!(
                "{outcome:?}: {} vs {} (matched {match_count}, mismatched {mismatch_count})",
                colors[0], colors[1]
            );
            console::log_1(&message.into());
        }
        GameEvent::GameOver {
            match_count,
            mismatch_count,
        } => {
            let message =
                format!("Game over: matched {match_count}, mismatched {mismatch_count}");
            console::warn_1(&message.into());
        }
        GameEvent::WindowClosed => console::log_1(&"Color Match closed".into()),
    }
}

struct Runtime {
    session: GameSession,
    surface: CanvasSurface,
    frame_timer: Option<Interval>,
}

impl Runtime {
    fn tick(&mut self, now: f64) -> FrameStatus {
        let status = self.session.frame(now, &mut self.surface);
        for event in self.session.drain_events() {
            log_event(&event);
        }
        status
    }
}

/// 运行中的游戏句柄，由 `run` 返回给 JS。
#[wasm_bindgen]
pub struct ColorMatch {
    runtime: Rc<RefCell<Runtime>>,
}

#[wasm_bindgen]
impl ColorMatch {
    /// 以窗口像素坐标注入一次按下事件，下一帧处理。
    pub fn press(&self, x: i32, y: i32) {
        self.runtime
            .borrow_mut()
            .session
            .push_input(InputEvent::Press { x, y });
    }

    pub fn stop(&self) {
        self.runtime.borrow_mut().session.push_input(InputEvent::Close);
    }

    pub fn is_closed(&self) -> bool {
        self.runtime.borrow().session.is_closed()
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let snapshot = self.runtime.borrow().session.snapshot();
        serde_json::to_string(&snapshot).map_err(serde_to_js_error)
    }
}

/// 入口：获取（或创建）画布，安装输入监听，并以固定帧率启动主循环。
#[wasm_bindgen]
pub fn run(canvas_id: &str, config_json: Option<String>) -> Result<ColorMatch, JsValue> {
    launch(canvas_id, config_json.as_deref()).map_err(|error| {
        console::error_1(&format!("Color Match failed to start: {error}").into());
        to_js_error(error)
    })
}

fn launch(canvas_id: &str, config_json: Option<&str>) -> Result<ColorMatch, GameError> {
    let config = GameConfig::from_json(config_json)?;
    let session = GameSession::new(&config, RandomColors::from_seed_option(config.seed))?;
    let (width, height) = session.window_size();

    let canvas = acquire_canvas(canvas_id, width, height)?;
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or(GameError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GameError::ContextUnavailable)?;

    let runtime = Rc::new(RefCell::new(Runtime {
        session,
        surface: CanvasSurface::new(ctx, width, height),
        frame_timer: None,
    }));
    install_listeners(&canvas, &runtime)?;
    start_frame_loop(&runtime, config.frame_interval_ms());

    let summary = serde_json::to_string(&config).unwrap_or_default();
    console::log_1(&format!("Color Match started with config {summary}").into());
    Ok(ColorMatch { runtime })
}

fn acquire_canvas(id: &str, width: u32, height: u32) -> Result<HtmlCanvasElement, GameError> {
    let window = web_sys::window().ok_or(GameError::WindowUnavailable)?;
    let document = window.document().ok_or(GameError::DocumentUnavailable)?;
    document.set_title(WINDOW_TITLE);

    let unavailable = || GameError::CanvasUnavailable { id: id.to_string() };
    let canvas: HtmlCanvasElement = match document.get_element_by_id(id) {
        Some(element) => element.dyn_into().map_err(|_| unavailable())?,
        None => {
            let canvas: HtmlCanvasElement = document
                .create_element("canvas")
                .map_err(|_| unavailable())?
                .dyn_into()
                .map_err(|_| unavailable())?;
            canvas.set_id(id);
            let body = document.body().ok_or_else(unavailable)?;
            body.append_child(&canvas).map_err(|_| unavailable())?;
            canvas
        }
    };
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(canvas)
}

fn install_listeners(
    canvas: &HtmlCanvasElement,
    runtime: &Rc<RefCell<Runtime>>,
) -> Result<(), GameError> {
    let target = Rc::clone(runtime);
    let on_press = Closure::wrap(Box::new(move |event: MouseEvent| {
        target.borrow_mut().session.push_input(InputEvent::Press {
            x: event.offset_x(),
            y: event.offset_y(),
        });
    }) as Box<dyn FnMut(_)>);
    canvas
        .add_event_listener_with_callback("mousedown", on_press.as_ref().unchecked_ref())
        .map_err(|_| GameError::ListenerFailed {
            event: "mousedown".into(),
        })?;
    on_press.forget();

    let window = web_sys::window().ok_or(GameError::WindowUnavailable)?;
    let target = Rc::clone(runtime);
    let on_close = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        target.borrow_mut().session.push_input(InputEvent::Close);
    }) as Box<dyn FnMut(_)>);
    window
        .add_event_listener_with_callback(CLOSE_EVENT, on_close.as_ref().unchecked_ref())
        .map_err(|_| GameError::ListenerFailed {
            event: CLOSE_EVENT.into(),
        })?;
    on_close.forget();
    Ok(())
}

fn start_frame_loop(runtime: &Rc<RefCell<Runtime>>, interval_ms: u32) {
    let target = Rc::clone(runtime);
    let timer = Interval::new(interval_ms, move || {
        let mut runtime = target.borrow_mut();
        if runtime.tick(Date::now()) == FrameStatus::Closed {
            // The interval cannot be dropped from inside its own callback.
            if let Some(timer) = runtime.frame_timer.take() {
                Timeout::new(0, move || drop(timer)).forget();
            }
        }
    });
    runtime.borrow_mut().frame_timer = Some(timer);
}

#[wasm_bindgen(js_name = "computeTileSpacing")]
pub fn compute_tile_spacing_js(
    columns: u32,
    rows: u32,
    padding: u32,
    width: u32,
    height: u32,
) -> Vec<u32> {
    let (dx, dy) = compute_tile_spacing(columns, rows, padding, (width, height));
    vec![dx, dy]
}

/// 返回默认配置的 JSON，方便前端调试或作为覆盖模板。
#[wasm_bindgen(js_name = "defaultConfigJson")]
pub fn default_config_json() -> Result<String, JsValue> {
    serde_json::to_string(&GameConfig::default()).map_err(serde_to_js_error)
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}
