//! 绘制接口与 canvas 实现。

use web_sys::CanvasRenderingContext2d;

use crate::game::{Color, Rect};

pub const LABEL_FONT: &str = "60px Arial";

/// 游戏绘制所需的最小绘图能力。
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, bounds: Rect, color: Color);

    /// 文本右边缘贴在 `right`，顶部位于 `top`。
    fn draw_text_right(&mut self, text: &str, right: f64, top: f64, color: Color);
}

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        ctx.set_font(LABEL_FONT);
        ctx.set_text_align("right");
        ctx.set_text_baseline("top");
        Self { ctx, width, height }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(
            bounds.x as f64,
            bounds.y as f64,
            bounds.width as f64,
            bounds.height as f64,
        );
    }

    fn draw_text_right(&mut self, text: &str, right: f64, top: f64, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_text(text, right, top).ok();
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlCanvasElement;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas_surface() -> (CanvasSurface, CanvasRenderingContext2d) {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("test page should have a document");
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .expect("canvas element should be created")
            .dyn_into()
            .expect("element should be a canvas");
        canvas.set_width(120);
        canvas.set_height(40);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup should succeed")
            .expect("canvas should provide a 2d context")
            .dyn_into()
            .expect("context should be 2d");
        (CanvasSurface::new(ctx.clone(), 120, 40), ctx)
    }

    fn pixel(ctx: &CanvasRenderingContext2d, x: f64, y: f64) -> Vec<u8> {
        ctx.get_image_data(x, y, 1.0, 1.0)
            .expect("pixel should be readable")
            .data()
            .to_vec()
    }

    #[wasm_bindgen_test]
    fn labels_are_right_aligned_from_the_top() {
        let (_surface, ctx) = canvas_surface();
        assert_eq!(ctx.text_align(), "right");
        assert_eq!(ctx.text_baseline(), "top");
        assert!(ctx.font().contains("60px"), "label font should be 60px");
        assert!(ctx.font().contains("Arial"), "label font should be Arial");
    }

    #[wasm_bindgen_test]
    fn clear_and_fill_paint_the_requested_colours() {
        let (mut surface, ctx) = canvas_surface();
        surface.clear(Color::BLACK);
        surface.fill_rect(Rect::new(10, 10, 20, 20), Color::RED);

        assert_eq!(pixel(&ctx, 2.0, 2.0), vec![0, 0, 0, 255]);
        assert_eq!(pixel(&ctx, 15.0, 15.0), vec![255, 0, 0, 255]);
        assert_eq!(pixel(&ctx, 35.0, 15.0), vec![0, 0, 0, 255]);
    }

    #[wasm_bindgen_test]
    fn size_reports_canvas_dimensions() {
        let (surface, _ctx) = canvas_surface();
        assert_eq!(surface.size(), (120, 40));
    }
}
