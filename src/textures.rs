//! Particle alpha mask loading.
//!
//! The galaxy's point sprites take their opacity from a small RGBA texture.
//! Only the green channel is sampled, so grayscale masks work as-is.
//!
//! # Supported Formats
//!
//! - PNG (recommended)
//! - JPEG

use crate::error::TextureError;
use std::path::Path;

/// Default mask location, relative to the working directory.
pub const DEFAULT_MASK_PATH: &str = "assets/particle.png";

/// Edge length of the generated fallback mask.
pub const FALLBACK_SIZE: u32 = 64;

/// RGBA8 pixels for the sprite alpha mask.
#[derive(Debug, Clone)]
pub struct AlphaMask {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl AlphaMask {
    /// Load a mask from an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// A white disc whose alpha falls off smoothly towards the edge.
    ///
    /// ```
    /// use stardust::textures::AlphaMask;
    ///
    /// let mask = AlphaMask::soft_disc(16);
    /// assert_eq!(mask.data.len(), 16 * 16 * 4);
    /// ```
    pub fn soft_disc(size: u32) -> Self {
        let size = size.max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let half = size as f32 / 2.0;
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let r = (dx * dx + dy * dy).sqrt();
                // Smoothstep from the rim inwards.
                let t = (1.0 - r).clamp(0.0, 1.0);
                let v = (t * t * (3.0 - 2.0 * t) * 255.0).round() as u8;
                data.extend_from_slice(&[v, v, v, v]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Load `path`, or fall back to [`soft_disc`](Self::soft_disc) with a
    /// warning if it cannot be read.
    pub fn load_or_fallback<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(mask) => {
                log::info!(
                    "Loaded particle mask {} ({}x{})",
                    path.display(),
                    mask.width,
                    mask.height
                );
                mask
            }
            Err(e) => {
                log::warn!(
                    "Could not load particle mask {}: {}; using a generated soft disc",
                    path.display(),
                    e
                );
                Self::soft_disc(FALLBACK_SIZE)
            }
        }
    }

    /// Green channel value at `(x, y)`, the value the sprite shader samples.
    pub fn coverage(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4 + 1) as usize;
        self.data.get(idx).copied()
    }
}
