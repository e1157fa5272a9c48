use std::ops::{Deref, DerefMut};

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::composite::{PremulRgba8, over, plus};

/// How new paint combines with existing surface content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Porter-Duff source-over (normal painting).
    #[default]
    SourceOver,
    /// Additive blending: overlapping paint brightens instead of occluding.
    Lighter,
}

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// CPU raster target: premultiplied RGBA8 pixels plus the current blend state.
///
/// Width and height are bounded to `1..=65535` by the rasterizer, so a constructed surface is
/// always drawable.
#[derive(Clone, Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    blend: BlendMode,
}

impl Surface {
    /// Largest supported width or height.
    pub const MAX_DIMENSION: u32 = u16::MAX as u32;

    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
            blend: BlendMode::SourceOver,
        })
    }

    /// Reallocate for new dimensions (contents become transparent). No-op when unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> ReelResult<()> {
        check_dimensions(width, height)?;
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.data = vec![0u8; width as usize * height as usize * 4];
        }
        Ok(())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Current blend state.
    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Change the blend state used by subsequent paint calls.
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    /// Switch to `mode` until the returned guard is dropped, then restore the previous state.
    pub fn with_blend_mode(&mut self, mode: BlendMode) -> BlendGuard<'_> {
        let previous = self.blend;
        self.blend = mode;
        BlendGuard {
            surface: self,
            previous,
        }
    }

    /// Overwrite every pixel with transparent black (ignores the blend state).
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Read one pixel. Returns `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some(Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        })
    }

    /// Paint one premultiplied pixel with the current blend state. Out-of-bounds writes are
    /// ignored.
    pub fn paint_pixel(&mut self, x: u32, y: u32, src: Rgba8Premul) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.blend_at(i, src.to_array());
    }

    /// Paint a tightly packed premultiplied `w x h` image whose top-left lands at `(x0, y0)`.
    /// The part falling outside the surface is dropped.
    pub(crate) fn paint_image(&mut self, x0: u32, y0: u32, w: u32, h: u32, src: &[u8]) {
        debug_assert_eq!(src.len(), w as usize * h as usize * 4);
        let cols = w.min(self.width.saturating_sub(x0));
        let rows = h.min(self.height.saturating_sub(y0));
        for row in 0..rows {
            for col in 0..cols {
                let s = ((row * w + col) as usize) * 4;
                let px = [src[s], src[s + 1], src[s + 2], src[s + 3]];
                let d = self.index(x0 + col, y0 + row);
                self.blend_at(d, px);
            }
        }
    }

    /// Snapshot the current pixels.
    pub fn to_frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
            premultiplied: true,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn blend_at(&mut self, i: usize, src: PremulRgba8) {
        let dst = [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ];
        let out = match self.blend {
            BlendMode::SourceOver => over(dst, src),
            BlendMode::Lighter => plus(dst, src),
        };
        self.data[i..i + 4].copy_from_slice(&out);
    }
}

/// Scoped blend-state override returned by [`Surface::with_blend_mode`].
pub struct BlendGuard<'a> {
    surface: &'a mut Surface,
    previous: BlendMode,
}

impl Deref for BlendGuard<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        self.surface
    }
}

impl DerefMut for BlendGuard<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        self.surface
    }
}

impl Drop for BlendGuard<'_> {
    fn drop(&mut self) {
        self.surface.blend = self.previous;
    }
}

fn check_dimensions(width: u32, height: u32) -> ReelResult<()> {
    if width == 0 || height == 0 {
        return Err(ReelError::surface(format!(
            "surface must be non-empty, got {width}x{height}"
        )));
    }
    if width > Surface::MAX_DIMENSION || height > Surface::MAX_DIMENSION {
        return Err(ReelError::surface(format!(
            "surface {width}x{height} exceeds the {max}px raster limit",
            max = Surface::MAX_DIMENSION
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
