use kurbo::Point;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::unit_to_u8;
use crate::render::surface::Surface;
use crate::scene::color::Hsla;

/// Pixel-aligned rectangle `[x0, x1) x [y0, y1)` inside a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) x1: u32,
    pub(crate) y1: u32,
}

impl PixelRect {
    /// Bounding box of `points` grown by `margin`, clipped to `width x height`.
    /// `None` when nothing of it lands on the surface.
    pub(crate) fn around(points: &[Point], margin: f64, width: u32, height: u32) -> Option<Self> {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return None;
        }

        let clip = |v: f64, hi: u32| v.clamp(0.0, f64::from(hi)) as u32;
        let rect = Self {
            x0: clip((min_x - margin).floor(), width),
            y0: clip((min_y - margin).floor(), height),
            x1: clip((max_x + margin).ceil(), width),
            y1: clip((max_y + margin).ceil(), height),
        };
        (rect.x1 > rect.x0 && rect.y1 > rect.y0).then_some(rect)
    }

    pub(crate) fn width(self) -> u32 {
        self.x1 - self.x0
    }

    pub(crate) fn height(self) -> u32 {
        self.y1 - self.y0
    }
}

/// Fill the whole surface with a linear gradient running from the top-left corner (`start`) to
/// the bottom-right corner (`end`). Overwrites existing content.
pub(crate) fn fill_diagonal_gradient(surface: &mut Surface, start: Hsla, end: Hsla) {
    let (w, h) = (f64::from(surface.width()), f64::from(surface.height()));
    let a = start.to_rgba();
    let b = end.to_rgba();
    let len_sq = w * w + h * h;

    let width = surface.width() as usize;
    for (i, px) in surface.data_mut().chunks_exact_mut(4).enumerate() {
        let x = (i % width) as f64 + 0.5;
        let y = (i / width) as f64 + 0.5;
        let t = ((x * w + y * h) / len_sq).clamp(0.0, 1.0);

        let alpha = a[3] + (b[3] - a[3]) * t;
        let mut out = [0u8; 4];
        for c in 0..3 {
            out[c] = unit_to_u8((a[c] + (b[c] - a[c]) * t) * alpha);
        }
        out[3] = unit_to_u8(alpha);
        px.copy_from_slice(&out);
    }
}

/// Rasterize a closed polygon into a transparent premultiplied RGBA8 buffer covering `rect`.
///
/// `points` are in surface pixel space; the returned buffer is `rect.width() x rect.height()`.
pub(crate) fn rasterize_polygon(points: &[Point], color: Hsla, rect: PixelRect) -> Vec<u8> {
    // Surface dimensions are capped at u16::MAX, and `rect` is clipped to the surface.
    let w = rect.width() as u16;
    let h = rect.height() as u16;

    let mut path = vello_cpu::kurbo::BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        path.move_to(point_to_cpu(first));
        for &p in iter {
            path.line_to(point_to_cpu(p));
        }
        path.close_path();
    }

    let [r, g, b, a] = color.to_rgba8_straight();
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        -f64::from(rect.x0),
        -f64::from(rect.y0),
    )));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.fill_path(&path);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    pixmap.data_as_u8_slice().to_vec()
}

/// Paint a radial glow: `color` at `center`, fading linearly to transparent at `radius`.
/// Uses the surface's current blend state.
pub(crate) fn paint_radial_glow(surface: &mut Surface, center: Point, radius: f64, color: Hsla) {
    if !(radius > 0.0 && center.x.is_finite() && center.y.is_finite()) {
        return;
    }
    let bounds = [
        Point::new(center.x - radius, center.y - radius),
        Point::new(center.x + radius, center.y + radius),
    ];
    let Some(rect) = PixelRect::around(&bounds, 0.0, surface.width(), surface.height()) else {
        return;
    };

    let [r, g, b, peak] = color.to_rgba();
    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let d = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5).distance(center);
            if d >= radius {
                continue;
            }
            let alpha = peak * (1.0 - d / radius);
            let px = Rgba8Premul {
                r: unit_to_u8(r * alpha),
                g: unit_to_u8(g * alpha),
                b: unit_to_u8(b * alpha),
                a: unit_to_u8(alpha),
            };
            if px.a > 0 {
                surface.paint_pixel(x, y, px);
            }
        }
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
