//! Gaussian-like blur for premultiplied RGBA8 buffers.
//!
//! Three successive box blurs approximate a Gaussian of the requested standard deviation at a
//! per-pixel cost independent of the radius. Edges clamp to the nearest pixel.

const PASSES: usize = 3;

/// Blur `data` in place. `sigma <= 0` (or non-finite) leaves the buffer untouched.
pub(crate) fn blur_rgba8_premul(data: &mut [u8], width: u32, height: u32, sigma: f32) {
    debug_assert_eq!(data.len(), width as usize * height as usize * 4);
    if !sigma.is_finite() || sigma <= 0.0 || width == 0 || height == 0 {
        return;
    }

    let mut tmp = vec![0u8; data.len()];
    for size in box_sizes_for_gauss(sigma) {
        let radius = (size - 1) / 2;
        if radius == 0 {
            continue;
        }
        horizontal_pass(data, &mut tmp, width, height, radius);
        vertical_pass(&tmp, data, width, height, radius);
    }
}

/// Extent in pixels beyond which a blurred shape contributes nothing.
pub(crate) fn blur_extent(sigma: f32) -> u32 {
    box_sizes_for_gauss(sigma)
        .iter()
        .map(|size| (size - 1) / 2)
        .sum()
}

/// Odd box widths whose successive application approximates a Gaussian with `sigma`.
fn box_sizes_for_gauss(sigma: f32) -> [u32; PASSES] {
    if !sigma.is_finite() || sigma <= 0.0 {
        return [1; PASSES];
    }
    let n = PASSES as f64;
    let s2 = f64::from(sigma) * f64::from(sigma);

    let ideal = (12.0 * s2 / n + 1.0).sqrt();
    let mut lower = ideal.floor() as i64;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let lower = lower.max(1);
    let upper = lower + 2;

    let lf = lower as f64;
    let m_ideal = (12.0 * s2 - n * lf * lf - 4.0 * n * lf - 3.0 * n) / (-4.0 * lf - 4.0);
    let m = m_ideal.round().clamp(0.0, n) as usize;

    let mut sizes = [upper as u32; PASSES];
    for s in sizes.iter_mut().take(m) {
        *s = lower as u32;
    }
    sizes
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as i64;
    let r = i64::from(radius);
    let div = (2 * radius + 1) as u32;
    for y in 0..height as i64 {
        let row = (y * w) as usize * 4;
        let px = |x: i64| row + (x.clamp(0, w - 1) as usize) * 4;

        let mut acc = [0u32; 4];
        for dx in -r..=r {
            let idx = px(dx);
            for c in 0..4 {
                acc[c] += u32::from(src[idx + c]);
            }
        }
        for x in 0..w {
            let out = row + (x as usize) * 4;
            for c in 0..4 {
                dst[out + c] = ((acc[c] + div / 2) / div) as u8;
            }
            let add = px(x + r + 1);
            let sub = px(x - r);
            for c in 0..4 {
                acc[c] = acc[c] + u32::from(src[add + c]) - u32::from(src[sub + c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let w = width as usize;
    let h = height as i64;
    let r = i64::from(radius);
    let div = (2 * radius + 1) as u32;
    for x in 0..w {
        let px = |y: i64| ((y.clamp(0, h - 1) as usize) * w + x) * 4;

        let mut acc = [0u32; 4];
        for dy in -r..=r {
            let idx = px(dy);
            for c in 0..4 {
                acc[c] += u32::from(src[idx + c]);
            }
        }
        for y in 0..h {
            let out = px(y);
            for c in 0..4 {
                dst[out + c] = ((acc[c] + div / 2) / div) as u8;
            }
            let add = px(y + r + 1);
            let sub = px(y - r);
            for c in 0..4 {
                acc[c] = acc[c] + u32::from(src[add + c]) - u32::from(src[sub + c]);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
