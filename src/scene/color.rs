use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::{unit_to_u8, wrap_unit};

/// Hue/saturation/lightness color with straight alpha.
///
/// `h` is a fraction of a full turn in `[0, 1)`; `s`, `l`, `a` are in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsla {
    /// Hue as a fraction of a turn.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Lightness.
    pub l: f64,
    /// Straight alpha.
    pub a: f64,
}

impl Hsla {
    /// Build a color, wrapping the hue into `[0, 1)`.
    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self {
            h: wrap_unit(h),
            s,
            l,
            a,
        }
    }

    /// Build a color from a hue in degrees (any real value, wrapped).
    pub fn from_degrees(deg: f64, s: f64, l: f64, a: f64) -> Self {
        Self::new(deg / 360.0, s, l, a)
    }

    /// Convert to straight-alpha sRGB channels in `[0, 1]`.
    pub fn to_rgba(self) -> [f64; 4] {
        let h = wrap_unit(self.h);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        let a = self.a.clamp(0.0, 1.0);

        if s == 0.0 {
            return [l, l, l, a];
        }

        fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                return p + (q - p) * 6.0 * t;
            }
            if t < 1.0 / 2.0 {
                return q;
            }
            if t < 2.0 / 3.0 {
                return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
            }
            p
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        [
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
            a,
        ]
    }

    /// Quantize to premultiplied RGBA8.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let [r, g, b, a] = self.to_rgba();
        Rgba8Premul {
            r: unit_to_u8(r * a),
            g: unit_to_u8(g * a),
            b: unit_to_u8(b * a),
            a: unit_to_u8(a),
        }
    }

    /// Quantize to straight-alpha RGBA8 (the form `vello_cpu` paints take).
    pub fn to_rgba8_straight(self) -> [u8; 4] {
        let [r, g, b, a] = self.to_rgba();
        [unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
