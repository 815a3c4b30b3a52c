use echo_core::{Canvas, ColorStop, DisplayList, DrawCmd, Paint, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Replays display lists on a canvas 2D context.
pub struct CanvasTarget {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasTarget {
    /// `None` when the element cannot hand out a 2D context.
    pub fn acquire(canvas: web::HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn exec(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear => {
                let (w, h) = self.size();
                ctx.clear_rect(0.0, 0.0, w, h);
            }
            DrawCmd::FillRect {
                origin,
                size,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Save => ctx.save(),
            DrawCmd::Restore => ctx.restore(),
            DrawCmd::RotateAbout { pivot, angle } => {
                _ = ctx.translate(pivot.x as f64, pivot.y as f64);
                _ = ctx.rotate(*angle as f64);
                _ = ctx.translate(-pivot.x as f64, -pivot.y as f64);
            }
            DrawCmd::SetShadow { blur, color } => {
                ctx.set_shadow_blur(*blur as f64);
                ctx.set_shadow_color(&color.to_css());
            }
            DrawCmd::StrokeArc {
                center,
                radius,
                start,
                end,
                paint,
                line_width,
                alpha,
            } => {
                if !self.set_stroke(paint) {
                    return;
                }
                ctx.set_line_width(*line_width as f64);
                ctx.set_global_alpha(*alpha as f64);
                ctx.begin_path();
                _ = ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    radius.max(0.0) as f64,
                    *start as f64,
                    *end as f64,
                );
                ctx.stroke();
                ctx.set_global_alpha(1.0);
            }
            DrawCmd::StrokeLines {
                lines,
                color,
                line_width,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*line_width as f64);
                for (a, b) in lines {
                    ctx.begin_path();
                    ctx.move_to(a.x as f64, a.y as f64);
                    ctx.line_to(b.x as f64, b.y as f64);
                    ctx.stroke();
                }
            }
            DrawCmd::StrokeLine {
                from,
                to,
                paint,
                line_width,
                alpha,
            } => {
                if !self.set_stroke(paint) {
                    return;
                }
                ctx.set_line_width(*line_width as f64);
                ctx.set_global_alpha(*alpha as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
                ctx.set_global_alpha(1.0);
            }
            DrawCmd::StrokePolyline {
                points,
                color,
                line_width,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*line_width as f64);
                ctx.stroke();
            }
            DrawCmd::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                _ = ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    radius.max(0.0) as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            DrawCmd::FillEllipse {
                center,
                radii,
                stops,
            } => {
                // Unit-circle gradient scaled into an ellipse
                if radii.x <= 0.0 || radii.y <= 0.0 {
                    return;
                }
                let Ok(gradient) = ctx.create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, 1.0) else {
                    return;
                };
                add_stops(&gradient, stops);
                let (w, h) = self.size();
                let (cx, cy) = (center.x as f64, center.y as f64);
                let (rx, ry) = (radii.x as f64, radii.y as f64);
                ctx.save();
                _ = ctx.translate(cx, cy);
                _ = ctx.scale(rx, ry);
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(-cx / rx, -cy / ry, w / rx, h / ry);
                ctx.restore();
            }
        }
    }

    fn set_stroke(&self, paint: &Paint) -> bool {
        let ctx = &self.ctx;
        match paint {
            Paint::Solid(color) => ctx.set_stroke_style_str(&color.to_css()),
            Paint::Linear { from, to, stops } => {
                let gradient =
                    ctx.create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
                add_stops(&gradient, stops);
                ctx.set_stroke_style_canvas_gradient(&gradient);
            }
            Paint::Radial {
                center,
                inner,
                outer,
                stops,
            } => {
                let (x, y) = (center.x as f64, center.y as f64);
                match ctx.create_radial_gradient(x, y, inner.max(0.0) as f64, x, y, outer.max(0.0) as f64) {
                    Ok(gradient) => {
                        add_stops(&gradient, stops);
                        ctx.set_stroke_style_canvas_gradient(&gradient);
                    }
                    Err(e) => {
                        log::debug!("[canvas] radial gradient rejected: {:?}", e);
                        return false;
                    }
                }
            }
        }
        true
    }
}

fn add_stops(gradient: &web::CanvasGradient, stops: &[ColorStop]) {
    for stop in stops {
        _ = gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css());
    }
}

impl Canvas for CanvasTarget {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }

    fn draw(&mut self, list: &DisplayList) {
        for cmd in list.iter() {
            self.exec(cmd);
        }
    }
}
