//! Pixel formats and the color math the output paths share.

use bytemuck::{Pod, Zeroable};

/// RGB, 8 bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
#[repr(C)]
pub struct Rgb8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

/// RGBA, 8 bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
#[repr(C)]
pub struct Rgba8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Rgba8 {
  /// Drops the alpha channel.
  #[inline]
  #[must_use]
  pub const fn to_rgb(self) -> Rgb8 {
    Rgb8 { r: self.r, g: self.g, b: self.b }
  }
}

impl From<Rgb8> for Rgba8 {
  /// Fully opaque.
  #[inline]
  fn from(Rgb8 { r, g, b }: Rgb8) -> Self {
    Self { r, g, b, a: 255 }
  }
}

/// Composites `fg` over `bg` by `fg`'s alpha.
///
/// Per channel: `round(α·fg + (1−α)·bg)` with `α = a/255`. The endpoints
/// are exact: alpha 0 gives back `bg`, alpha 255 gives back `fg`.
#[must_use]
pub fn blend(fg: Rgba8, bg: Rgb8) -> Rgb8 {
  let alpha = f32::from(fg.a) / 255.0;
  let channel = |f: u8, b: u8| (alpha * f32::from(f) + (1.0 - alpha) * f32::from(b)).round() as u8;
  Rgb8 { r: channel(fg.r, bg.r), g: channel(fg.g, bg.g), b: channel(fg.b, bg.b) }
}

/// Rec.601 luma of an 8-bit RGB triple, in `0.0..=255.0`.
///
/// The weights sum to exactly 1, so white comes out at 255.
#[must_use]
pub fn rec601_luma(r: u8, g: u8, b: u8) -> f32 {
  0.30 * f32::from(r) + 0.59 * f32::from(g) + 0.11 * f32::from(b)
}

/// Rec.709 luma of an 8-bit RGB triple, normalized to `0.0..=1.0`.
#[must_use]
pub fn rec709_luma(r: u8, g: u8, b: u8) -> f32 {
  0.2126 * (f32::from(r) / 255.0)
    + 0.7152 * (f32::from(g) / 255.0)
    + 0.0722 * (f32::from(b) / 255.0)
}

/// Linear interpolation from `a` to `b` by `t`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
  a + (b - a) * t
}
