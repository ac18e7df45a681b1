//! Canvas2D painter

use web_sys::CanvasRenderingContext2d;

use super::{Primitive, Scene};

const FONT_FAMILY: &str = "\"Courier New\"";

/// Clear the field and draw every primitive in order
pub fn paint(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    ctx.clear_rect(0.0, 0.0, scene.size.x as f64, scene.size.y as f64);

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Rect { pos, size, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            Primitive::Triangle { points, color } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.move_to(points[0].x as f64, points[0].y as f64);
                ctx.line_to(points[1].x as f64, points[1].y as f64);
                ctx.line_to(points[2].x as f64, points[2].y as f64);
                ctx.fill();
            }
            Primitive::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            Primitive::Outline { pos, size, color } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(1.0);
                ctx.stroke_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            Primitive::Text {
                text,
                pos,
                px,
                align,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.set_font(&format!("{}px {}", px, FONT_FAMILY));
                ctx.set_text_align(align.as_str());
                if let Err(e) = ctx.fill_text(text, pos.x as f64, pos.y as f64) {
                    log::warn!("fill_text failed: {:?}", e);
                }
            }
        }
    }
}
