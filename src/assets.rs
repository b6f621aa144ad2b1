//! Source images: loading from disk, or the built-in glyph set.
//!
//! Images are expected to follow the icon convention the sampler looks for:
//! opaque black artwork on a transparent background. Any size works; they are
//! scaled onto the sampling canvas when drawn.
//!
//! # Supported Formats
//!
//! - PNG (recommended, keeps transparency)
//! - JPEG (no alpha, so every pixel counts as visible)

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::AssetError;

/// Native size of the generated glyphs.
pub const GLYPH_SIZE: u32 = 480;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Decode one image file to RGBA.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage, AssetError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded '{}' ({}x{})", path.display(), image.width(), image.height());
    Ok(image.into_rgba8())
}

/// Decode every image in order. Fails on the first broken file.
pub fn load_images<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RgbaImage>, AssetError> {
    if paths.is_empty() {
        return Err(AssetError::NoImages);
    }
    paths.iter().map(load_image).collect()
}

/// Procedural glyphs: disc, ring, cross, diamond, star, heart.
pub fn builtin_glyphs() -> Vec<RgbaImage> {
    vec![
        glyph(|x, y| x * x + y * y <= 0.8 * 0.8),
        glyph(|x, y| {
            let r2 = x * x + y * y;
            (0.5 * 0.5..=0.85 * 0.85).contains(&r2)
        }),
        glyph(|x, y| (x.abs() <= 0.2 && y.abs() <= 0.85) || (y.abs() <= 0.2 && x.abs() <= 0.85)),
        glyph(|x, y| x.abs() + y.abs() <= 0.85),
        glyph(star),
        glyph(heart),
    ]
}

/// Render a glyph from a predicate over `[-1, 1]` coordinates (y up).
fn glyph(inside: impl Fn(f32, f32) -> bool) -> RgbaImage {
    let half = GLYPH_SIZE as f32 / 2.0;
    RgbaImage::from_fn(GLYPH_SIZE, GLYPH_SIZE, |px, py| {
        let x = (px as f32 + 0.5 - half) / half;
        let y = (half - py as f32 - 0.5) / half;
        if inside(x, y) {
            INK
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Five-pointed star: radius limit oscillates between inner and outer.
fn star(x: f32, y: f32) -> bool {
    use std::f32::consts::{FRAC_PI_2, TAU};

    let r = (x * x + y * y).sqrt();
    let angle = (y.atan2(x) - FRAC_PI_2).rem_euclid(TAU / 5.0);
    let t = (angle / (TAU / 5.0) * 2.0 - 1.0).abs();
    let limit = 0.38 + (0.9 - 0.38) * t;
    r <= limit
}

/// Classic implicit heart curve, scaled to the glyph box.
fn heart(x: f32, y: f32) -> bool {
    let (x, y) = (x * 1.25, y * 1.25 + 0.15);
    let a = x * x + y * y - 1.0;
    a * a * a - x * x * y * y * y <= 0.0
}
