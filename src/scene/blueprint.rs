use std::f64::consts::TAU;
use std::ops::Range;

use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::color::Hsla;

/// Layer count bounds (inclusive lower, exclusive upper).
pub const LAYER_COUNT: Range<usize> = 5..10;
/// Spark count bounds (inclusive lower, exclusive upper).
pub const SPARK_COUNT: Range<usize> = 120..300;

const LAYER_RADIUS: Range<f64> = 0.25..0.90;
const LAYER_ROTATION: Range<f64> = 0.0..TAU;
const LAYER_SPEED: Range<f64> = 0.2..1.1;
const LAYER_VARIANCE: Range<f64> = 0.2..0.8;

const SPARK_ANGLE: Range<f64> = 0.0..TAU;
const SPARK_DISTANCE: Range<f64> = 0.1..1.0;
const SPARK_SIZE: Range<f64> = 1.0..3.0;
const SPARK_DRIFT: Range<f64> = 0.5..2.0;
const SPARK_HUE_SHIFT: Range<f64> = -20.0..20.0;

const PULSE: Range<f64> = 0.4..0.8;
const DISTORT: Range<f64> = 0.5..1.4;

/// One distorted, rotating, semi-transparent polygon.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LayerSpec {
    /// Fill color (alpha < 1, so lower layers stay visible).
    pub color: Hsla,
    /// Base radius as a fraction of the canvas max dimension's half.
    pub radius: f64,
    /// Initial rotation phase in radians.
    pub rotation: f64,
    /// Angular rate per second.
    pub speed: f64,
    /// Distortion amplitude.
    pub variance: f64,
}

/// One additively blended radial glow orbiting the canvas center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SparkSpec {
    /// Orbit angle in radians.
    pub angle: f64,
    /// Orbit distance as a fraction of the maximum spark radius.
    pub distance: f64,
    /// Glow radius unit (outer radius is `size * 12` px).
    pub size: f64,
    /// Per-spark time-rate multiplier.
    pub drift: f64,
    /// Hue offset in degrees.
    pub hue_shift: f64,
}

/// Immutable description of one generated scene.
///
/// Built once per normalized prompt by [`build_blueprint`](crate::build_blueprint); carries no
/// reference to wall-clock time or canvas size.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneBlueprint {
    pub(crate) seed: u32,
    pub(crate) layers: Vec<LayerSpec>,
    pub(crate) sparks: Vec<SparkSpec>,
    pub(crate) background: [Hsla; 2],
    pub(crate) pulse: f64,
    pub(crate) distort: f64,
}

impl SceneBlueprint {
    /// Digest of the normalized prompt that produced this scene.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Layers in back-to-front paint order.
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Sparks in generation order.
    pub fn sparks(&self) -> &[SparkSpec] {
        &self.sparks
    }

    /// Background gradient stops: top-left, bottom-right.
    pub fn background(&self) -> [Hsla; 2] {
        self.background
    }

    /// Global breathing frequency.
    pub fn pulse(&self) -> f64 {
        self.pulse
    }

    /// Global distortion multiplier.
    pub fn distort(&self) -> f64 {
        self.distort
    }

    /// Check every count and numeric field against its generation range.
    pub fn check_invariants(&self) -> ReelResult<()> {
        fn in_range(name: &str, v: f64, r: &Range<f64>) -> ReelResult<()> {
            if v.is_finite() && r.contains(&v) {
                Ok(())
            } else {
                Err(ReelError::validation(format!(
                    "{name} = {v} outside [{}, {})",
                    r.start, r.end
                )))
            }
        }

        if !LAYER_COUNT.contains(&self.layers.len()) {
            return Err(ReelError::validation(format!(
                "layer count {} outside [{}, {})",
                self.layers.len(),
                LAYER_COUNT.start,
                LAYER_COUNT.end
            )));
        }
        if !SPARK_COUNT.contains(&self.sparks.len()) {
            return Err(ReelError::validation(format!(
                "spark count {} outside [{}, {})",
                self.sparks.len(),
                SPARK_COUNT.start,
                SPARK_COUNT.end
            )));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            let c = layer.color;
            for (field, v) in [("h", c.h), ("s", c.s), ("l", c.l), ("a", c.a)] {
                in_range(&format!("layers[{i}].color.{field}"), v, &(0.0..1.0))?;
            }
            in_range(&format!("layers[{i}].radius"), layer.radius, &LAYER_RADIUS)?;
            in_range(&format!("layers[{i}].rotation"), layer.rotation, &LAYER_ROTATION)?;
            in_range(&format!("layers[{i}].speed"), layer.speed, &LAYER_SPEED)?;
            in_range(&format!("layers[{i}].variance"), layer.variance, &LAYER_VARIANCE)?;
        }

        for (i, spark) in self.sparks.iter().enumerate() {
            in_range(&format!("sparks[{i}].angle"), spark.angle, &SPARK_ANGLE)?;
            in_range(&format!("sparks[{i}].distance"), spark.distance, &SPARK_DISTANCE)?;
            in_range(&format!("sparks[{i}].size"), spark.size, &SPARK_SIZE)?;
            in_range(&format!("sparks[{i}].drift"), spark.drift, &SPARK_DRIFT)?;
            in_range(&format!("sparks[{i}].hue_shift"), spark.hue_shift, &SPARK_HUE_SHIFT)?;
        }

        for (i, stop) in self.background.iter().enumerate() {
            in_range(&format!("background[{i}].h"), stop.h, &(0.0..1.0))?;
        }
        in_range("pulse", self.pulse, &PULSE)?;
        in_range("distort", self.distort, &DISTORT)?;
        Ok(())
    }
}
