use std::f64::consts::TAU;

use kurbo::{Point, Vec2};

use crate::render::blur::{blur_extent, blur_rgba8_premul};
use crate::render::raster::{
    PixelRect, fill_diagonal_gradient, paint_radial_glow, rasterize_polygon,
};
use crate::render::surface::{BlendMode, Surface};
use crate::scene::blueprint::{LayerSpec, SceneBlueprint, SparkSpec};
use crate::scene::color::Hsla;

/// Vertices traced around each layer outline.
pub const LAYER_SEGMENTS: usize = 360;

const PULSE_DEPTH: f64 = 0.05;
const DISTORT_SCALE: f64 = 0.4;
const LAYER_SPIN: f64 = 0.25;
const LAYER_BLUR_BASE: f64 = 3.0;
const LAYER_BLUR_STEP: f64 = 1.5;

const SPARK_PHASE_STEP: f64 = 0.01;
const SPARK_ORBIT: f64 = 0.45;
const SPARK_GLOW_UNIT: f64 = 12.0;
const SPARK_HUE_RATE: f64 = 40.0;
const SPARK_SATURATION: f64 = 0.9;
const SPARK_LIGHTNESS: f64 = 0.7;

/// Paint the scene at `elapsed_secs` onto `surface`, overwriting all of its pixels.
///
/// The result depends only on the surface dimensions, the time and the blueprint, so frames
/// may be rendered in any order or concurrently into distinct surfaces. The surface is left in
/// [`BlendMode::SourceOver`].
pub fn render_frame(surface: &mut Surface, elapsed_secs: f64, blueprint: &SceneBlueprint) {
    let t = if elapsed_secs.is_finite() {
        elapsed_secs
    } else {
        tracing::debug!(elapsed_secs, "non-finite frame time, rendering t = 0");
        0.0
    };

    surface.set_blend_mode(BlendMode::SourceOver);
    surface.clear();

    let [start, end] = blueprint.background();
    fill_diagonal_gradient(surface, start, end);

    let pulse = 1.0 + (t * blueprint.pulse()).sin() * PULSE_DEPTH;
    for (index, layer) in blueprint.layers().iter().enumerate() {
        paint_layer(surface, layer, index, t, pulse, blueprint.distort());
    }

    // The guard puts the surface back into source-over once the spark pass ends.
    let mut additive = surface.with_blend_mode(BlendMode::Lighter);
    for (index, spark) in blueprint.sparks().iter().enumerate() {
        paint_spark(&mut additive, spark, index, t);
    }
}

/// Outline of one layer at time `t`, in surface pixel space.
pub(crate) fn layer_outline(
    layer: &LayerSpec,
    index: usize,
    t: f64,
    pulse: f64,
    distort: f64,
    center: Point,
    max_dimension: f64,
) -> Vec<Point> {
    let layer_time = t * layer.speed + layer.rotation;
    let radius = max_dimension * layer.radius * pulse / 2.0;
    let frequency = 2.0 + index as f64;
    let amplitude = layer.variance * distort * DISTORT_SCALE;
    let spin = layer_time * LAYER_SPIN;

    (0..LAYER_SEGMENTS)
        .map(|step| {
            let angle = step as f64 / LAYER_SEGMENTS as f64 * TAU;
            let r = radius * (1.0 + (angle * frequency + layer_time).sin() * amplitude);
            let theta = angle + spin;
            center + Vec2::new(theta.cos(), theta.sin()) * r
        })
        .collect()
}

fn paint_layer(
    surface: &mut Surface,
    layer: &LayerSpec,
    index: usize,
    t: f64,
    pulse: f64,
    distort: f64,
) {
    let canvas = surface.canvas();
    let outline = layer_outline(
        layer,
        index,
        t,
        pulse,
        distort,
        canvas.center(),
        f64::from(canvas.max_dimension()),
    );

    let sigma = (LAYER_BLUR_BASE + index as f64 * LAYER_BLUR_STEP) as f32;
    let margin = f64::from(blur_extent(sigma));
    let Some(rect) = PixelRect::around(&outline, margin, canvas.width, canvas.height) else {
        return;
    };

    let mut shape = rasterize_polygon(&outline, layer.color, rect);
    blur_rgba8_premul(&mut shape, rect.width(), rect.height(), sigma);
    surface.paint_image(rect.x0, rect.y0, rect.width(), rect.height(), &shape);
}

fn paint_spark(surface: &mut Surface, spark: &SparkSpec, index: usize, t: f64) {
    let canvas = surface.canvas();
    let spark_time = t * spark.drift + index as f64 * SPARK_PHASE_STEP;
    let angle = spark.angle + (spark_time * 0.5).sin() * 0.5;
    let distance = spark.distance + spark_time.sin() * 0.02;
    let reach = distance * f64::from(canvas.max_dimension()) * SPARK_ORBIT;
    let center = canvas.center() + Vec2::new(angle.cos(), angle.sin()) * reach;

    let color = Hsla::from_degrees(
        spark.hue_shift + t * SPARK_HUE_RATE,
        SPARK_SATURATION,
        SPARK_LIGHTNESS,
        1.0,
    );
    paint_radial_glow(surface, center, spark.size * SPARK_GLOW_UNIT, color);
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
