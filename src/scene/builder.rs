use std::borrow::Cow;
use std::f64::consts::TAU;

use crate::scene::blueprint::{LayerSpec, SceneBlueprint, SparkSpec};
use crate::scene::color::Hsla;
use crate::scene::hash::prompt_hash;
use crate::scene::rng::SeededGenerator;

/// Token substituted for empty or whitespace-only prompts.
pub const DEFAULT_PROMPT: &str = "aurora drift";

const LAYER_HUE_JITTER: f64 = 0.25;
const LAYER_HUE_STEP: f64 = 0.03;
const LAYER_SATURATION: f64 = 0.70;
const LAYER_LIGHTNESS: f64 = 0.55;
const LAYER_ALPHA: f64 = 0.35;

/// Trim and lowercase `prompt`, falling back to [`DEFAULT_PROMPT`] when nothing is left.
///
/// Two prompts with equal normalized forms produce identical blueprints, so this is also the
/// right key for blueprint caches.
pub fn normalize_prompt(prompt: &str) -> Cow<'static, str> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        Cow::Borrowed(DEFAULT_PROMPT)
    } else {
        Cow::Owned(trimmed.to_lowercase())
    }
}

/// Derive the full scene for `prompt`.
///
/// Generator draws are consumed in a fixed order (layer count, 5 per layer, spark count, 5 per
/// spark, pulse, distort); changing that order changes every downstream blueprint. Spans are
/// written as literal `(lo, span)` pairs so every draw stays bit-exact.
pub fn build_blueprint(prompt: &str) -> SceneBlueprint {
    let normalized = normalize_prompt(prompt);
    let seed = prompt_hash(&normalized);

    let hue = f64::from(seed % 360) / 360.0;
    // Arithmetic shift on the signed view: the single seed 2^31 goes negative here and is
    // clamped to 0.
    let accent = (f64::from((seed as i32 >> 8) % 360) / 360.0).clamp(0.0, 1.0);
    let background = [
        Hsla::new(hue, 0.68, 0.12, 1.0),
        Hsla::new(hue + accent / 3.0, 0.80, 0.22, 1.0),
    ];

    let mut rng = SeededGenerator::new(seed);

    let layer_count = 5 + (rng.next_f64() * 5.0).floor() as usize;
    let layers = (0..layer_count)
        .map(|index| {
            let jitter = rng.next_f64();
            LayerSpec {
                color: Hsla::new(
                    hue + jitter * LAYER_HUE_JITTER + index as f64 * LAYER_HUE_STEP,
                    LAYER_SATURATION,
                    LAYER_LIGHTNESS,
                    LAYER_ALPHA,
                ),
                radius: rng.next_in(0.25, 0.65),
                rotation: rng.next_f64() * TAU,
                speed: rng.next_in(0.2, 0.9),
                variance: rng.next_in(0.2, 0.6),
            }
        })
        .collect::<Vec<_>>();

    let spark_count = 120 + (rng.next_f64() * 180.0).floor() as usize;
    let sparks = (0..spark_count)
        .map(|_| SparkSpec {
            angle: rng.next_f64() * TAU,
            distance: rng.next_in(0.1, 0.9),
            size: rng.next_in(1.0, 2.0),
            drift: rng.next_in(0.5, 1.5),
            hue_shift: rng.next_in(-20.0, 40.0),
        })
        .collect::<Vec<_>>();

    let pulse = rng.next_in(0.4, 0.4);
    let distort = rng.next_in(0.5, 0.9);

    tracing::debug!(
        prompt = %normalized,
        seed,
        layers = layers.len(),
        sparks = sparks.len(),
        "built scene blueprint"
    );

    SceneBlueprint {
        seed,
        layers,
        sparks,
        background,
        pulse,
        distort,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
