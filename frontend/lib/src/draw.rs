use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, OffscreenCanvas, OffscreenCanvasRenderingContext2d as CanvasContext,
};

use gridfall_core::state::{BOARD_HEIGHT, BOARD_WIDTH, Board};

/// Distance between cell origins; cells are 30px with a 1px seam.
const CELL_PITCH: f64 = 31.;
const CELL_COLOR: Color = Color::new(0, 160, 220);

pub struct DrawingContext {
    cell: SubImage,
    board: SubImage,
}

impl DrawingContext {
    pub fn clear(ctx: &CanvasRenderingContext2d) {
        ctx.clear_rect(0., 0., 1000., 700.);
    }

    pub fn new() -> Self {
        Self {
            cell: Self::make_cell(),
            board: Self::make_board(),
        }
    }

    fn make_cell() -> SubImage {
        let base_color = CELL_COLOR;
        SubImage::new(30, 30, |ctx| {
            let gradient = ctx.create_linear_gradient(0., 0., 0., 30.);
            let _ = gradient.add_color_stop(1., &base_color.lighten(0.3).to_css());
            let _ = gradient.add_color_stop(0., &base_color.lighten(0.7).to_css());

            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.fill_rect(2., 2., 28., 28.);

            ctx.set_stroke_style_str(&base_color.lighten(0.2).darken(0.15).to_css());
            ctx.set_line_width(2.);
            ctx.begin_path();
            let _ = ctx.round_rect_with_f64(2., 2., 27., 27., 2.);
            ctx.stroke();

            ctx.set_stroke_style_str(&base_color.lighten(0.3).darken(0.4).to_css());
            ctx.set_line_width(1.);
            ctx.begin_path();
            let _ = ctx.round_rect_with_f64(1., 1., 29., 29., 2.);
            ctx.stroke();
        })
    }

    fn make_board() -> SubImage {
        let width = BOARD_WIDTH as u32 * 31 + 9;
        let height = BOARD_HEIGHT as u32 * 31 + 9;
        SubImage::new(width, height, |ctx| {
            let width = f64::from(width);
            let height = f64::from(height);
            ctx.set_fill_style_str(&Color::new(40, 40, 40).to_css());
            ctx.fill_rect(0., 0., width, height);

            ctx.set_stroke_style_str(&Color::new(70, 70, 70).to_css());
            ctx.set_line_width(5.);
            ctx.stroke_rect(2., 2., width - 4., height - 4.);

            ctx.set_stroke_style_str(&Color::new(70, 70, 70).to_css());
            ctx.set_line_width(0.5);
            ctx.begin_path();
            for i in 0..=BOARD_WIDTH {
                let x = i as f64 * CELL_PITCH + 5.;
                ctx.move_to(x, 5.);
                ctx.line_to(x, height - 5.);
            }

            for i in 0..=BOARD_HEIGHT {
                let y = i as f64 * CELL_PITCH + 5.;
                ctx.move_to(5., y);
                ctx.line_to(width - 5., y);
            }
            ctx.stroke();
        })
    }

    pub fn draw_board(&self, ctx: &CanvasRenderingContext2d, off_x: f64, off_y: f64) {
        let _ = self.board.draw(ctx, off_x, off_y);
    }

    /// Paints every occupied cell of the polled grid, top row first.
    pub fn draw_field(&self, ctx: &CanvasRenderingContext2d, board: &Board, off_x: f64, off_y: f64) {
        for (row, cells) in board.rows().enumerate() {
            for (col, occupied) in cells.iter().enumerate() {
                if *occupied {
                    let _ = self.cell.draw(
                        ctx,
                        (col as f64) * CELL_PITCH + off_x,
                        (row as f64) * CELL_PITCH + off_y,
                    );
                }
            }
        }
    }

    pub fn draw_score(ctx: &CanvasRenderingContext2d, score: u32, x: f64, y: f64) {
        ctx.clear_rect(x, y, 240., 30.);
        ctx.set_fill_style_str("#099520");
        ctx.set_text_baseline("top");
        ctx.set_font("25px sans-serif");
        let _ = ctx.fill_text_with_max_width(&format!("Score: {score}"), x, y, 240.);
    }
}

struct SubImage {
    canvas: Rc<OffscreenCanvas>,
}

impl SubImage {
    fn new(width: u32, height: u32, init: impl FnOnce(&mut CanvasContext)) -> Self {
        let canvas = OffscreenCanvas::new(width, height).unwrap();
        let mut context = canvas
            .get_context("2d")
            .unwrap()
            .unwrap()
            .dyn_into::<CanvasContext>()
            .unwrap();
        // remove half-pixel offset
        let _ = context.translate(-0.5, -0.5);
        init(&mut context);
        Self {
            canvas: Rc::new(canvas),
        }
    }

    fn draw(&self, ctx: &CanvasRenderingContext2d, x: f64, y: f64) -> Result<(), JsValue> {
        ctx.draw_image_with_offscreen_canvas(&self.canvas, x, y)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn darken(self, amount: f64) -> Self {
        let multi = 1. - amount;
        Self {
            r: (f64::from(self.r) * multi) as u8,
            g: (f64::from(self.g) * multi) as u8,
            b: (f64::from(self.b) * multi) as u8,
        }
    }

    #[inline]
    fn lighten_single(v: u8, amount: f64) -> u8 {
        255 - (f64::from(255 - v) * (1. - amount)) as u8
    }

    fn lighten(self, amount: f64) -> Self {
        Self {
            r: Self::lighten_single(self.r, amount),
            g: Self::lighten_single(self.g, amount),
            b: Self::lighten_single(self.b, amount),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Color;

    #[test]
    fn css_hex_form() {
        assert_eq!(Color::new(0, 160, 220).to_css(), "#00a0dc");
        assert_eq!(Color::new(255, 255, 255).to_css(), "#ffffff");
    }

    #[test]
    fn lighten_and_darken_stay_in_range() {
        let c = Color::new(0, 160, 220);
        let lighter = c.lighten(0.5);
        assert!(lighter.r >= c.r && lighter.g >= c.g && lighter.b >= c.b);
        let darker = c.darken(0.5);
        assert!(darker.r <= c.r && darker.g <= c.g && darker.b <= c.b);
    }
}
