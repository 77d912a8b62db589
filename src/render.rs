use crate::core::{DrawCommand, DrawList, Rgb};
use std::f64::consts::TAU;
use web_sys as web;

/// Replays a [`DrawList`] onto a 2D canvas context in a single colour.
pub struct CanvasPainter {
    ctx: web::CanvasRenderingContext2d,
    color: Rgb,
}

impl CanvasPainter {
    pub fn new(ctx: web::CanvasRenderingContext2d, color: Rgb) -> Self {
        Self { ctx, color }
    }

    pub fn paint(&self, list: &DrawList) {
        for cmd in list.commands() {
            match *cmd {
                DrawCommand::Clear { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
                }
                DrawCommand::Line {
                    from,
                    to,
                    alpha,
                    width,
                } => {
                    self.ctx.begin_path();
                    self.ctx.move_to(from.x as f64, from.y as f64);
                    self.ctx.line_to(to.x as f64, to.y as f64);
                    self.ctx.set_stroke_style_str(&self.color.css(alpha));
                    self.ctx.set_line_width(width as f64);
                    self.ctx.stroke();
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    alpha,
                } => {
                    self.ctx.begin_path();
                    if self
                        .ctx
                        .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
                        .is_err()
                    {
                        continue;
                    }
                    self.ctx.set_fill_style_str(&self.color.css(alpha));
                    self.ctx.fill();
                }
            }
        }
    }
}
