use crate::color::{self, Rgba8};
use crate::{Ihdr, PixError, PixResult};

/// How [`Pixmap::scale`] resamples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMethod {
  /// Nearest-neighbor: fast, blocky.
  Nearest,
  /// Bilinear interpolation over the 2x2 neighborhood.
  Bilinear,
  /// Accepted for forward compatibility; currently resampled as
  /// [`Bilinear`](ScaleMethod::Bilinear) after a warning.
  Bicubic,
}

/// A densely packed, row-major raster.
///
/// `data` holds exactly `height * bytes_per_scanline()` bytes, top row
/// first. The decoder produces 3-channel (RGB) and 4-channel (RGBA)
/// rasters at bit depth 8, and those are the layouts the transforms below
/// operate on; 16-bit rasters are carried (big-endian sample bytes) and
/// sampled by their high byte.
///
/// A pixel index `(x, y)` with `x < width`, `y < height` addresses the
/// `bytes_per_pixel()` bytes at
/// `y * bytes_per_scanline() + x * bytes_per_pixel()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
  width: u32,
  height: u32,
  n_channels: usize,
  bit_depth: u8,
  data: Vec<u8>,
}

impl Pixmap {
  /// A zeroed raster.
  pub fn new(width: u32, height: u32, n_channels: usize, bit_depth: u8) -> PixResult<Self> {
    Self::check_shape(width, height, n_channels, bit_depth)?;
    let len = Self::scanline_len(width, n_channels, bit_depth) * height as usize;
    let mut data = Vec::new();
    data.try_reserve_exact(len)?;
    data.resize(len, 0);
    Ok(Self { width, height, n_channels, bit_depth, data })
  }

  /// Wraps an existing raster. `data` must be exactly
  /// `height * ceil(width * n_channels * bit_depth / 8)` bytes.
  pub fn from_vec(
    width: u32, height: u32, n_channels: usize, bit_depth: u8, data: Vec<u8>,
  ) -> PixResult<Self> {
    Self::check_shape(width, height, n_channels, bit_depth)?;
    let want = Self::scanline_len(width, n_channels, bit_depth) * height as usize;
    if data.len() != want {
      log::error!(
        "raster for {width}x{height} at {n_channels} channels, bit depth {bit_depth} \
         must be {want} bytes, got {}",
        data.len()
      );
      return Err(PixError::InvalidArgument);
    }
    Ok(Self { width, height, n_channels, bit_depth, data })
  }

  pub(crate) fn from_raster(ihdr: &Ihdr, data: Vec<u8>) -> Self {
    debug_assert_eq!(data.len(), ihdr.raster_len());
    Self {
      width: ihdr.width,
      height: ihdr.height,
      n_channels: ihdr.n_channels(),
      bit_depth: ihdr.bit_depth,
      data,
    }
  }

  fn check_shape(width: u32, height: u32, n_channels: usize, bit_depth: u8) -> PixResult<()> {
    if width == 0 || height == 0 || !matches!(n_channels, 1..=4) || !matches!(bit_depth, 8 | 16) {
      log::error!(
        "illegal pixmap shape: {width}x{height}, {n_channels} channels, bit depth {bit_depth}"
      );
      return Err(PixError::InvalidArgument);
    }
    Ok(())
  }

  const fn scanline_len(width: u32, n_channels: usize, bit_depth: u8) -> usize {
    ((width as usize) * n_channels * (bit_depth as usize) + 7) / 8
  }

  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  #[must_use]
  pub const fn n_channels(&self) -> usize {
    self.n_channels
  }

  #[must_use]
  pub const fn bit_depth(&self) -> u8 {
    self.bit_depth
  }

  /// The packed raster bytes, row-major, top row first.
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }

  /// Consumes the pixmap, keeping only the raster bytes.
  #[must_use]
  pub fn into_data(self) -> Vec<u8> {
    self.data
  }

  /// Packed bytes in one row.
  #[must_use]
  pub const fn bytes_per_scanline(&self) -> usize {
    Self::scanline_len(self.width, self.n_channels, self.bit_depth)
  }

  /// Whole bytes per pixel.
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    self.n_channels * if self.bit_depth > 8 { 2 } else { 1 }
  }

  const fn pixel_offset(&self, x: u32, y: u32) -> usize {
    (y as usize) * self.bytes_per_scanline() + (x as usize) * self.bytes_per_pixel()
  }

  /// The pixel at integer coordinates.
  ///
  /// Out-of-range coordinates are clamped to the edge, with one warning.
  /// Rasters with fewer than 3 channels read as replicated gray; rasters
  /// without an alpha channel read as alpha 255; 16-bit rasters read by
  /// their high (big-endian first) sample byte.
  #[must_use]
  pub fn sample_indexed(&self, x: u32, y: u32) -> Rgba8 {
    let cx = x.min(self.width - 1);
    let cy = y.min(self.height - 1);
    if cx != x || cy != y {
      log::warn!(
        "sample_indexed({x}, {y}) out of range for {}x{}, clamped",
        self.width,
        self.height
      );
    }
    let bps = if self.bit_depth > 8 { 2 } else { 1 };
    let o = self.pixel_offset(cx, cy);
    let sample = |channel: usize| self.data[o + channel * bps];
    match self.n_channels {
      1 => {
        let y = sample(0);
        Rgba8 { r: y, g: y, b: y, a: 255 }
      }
      2 => {
        let y = sample(0);
        Rgba8 { r: y, g: y, b: y, a: sample(1) }
      }
      3 => Rgba8 { r: sample(0), g: sample(1), b: sample(2), a: 255 },
      _ => Rgba8 { r: sample(0), g: sample(1), b: sample(2), a: sample(3) },
    }
  }

  /// Samples at normalized coordinates in `[0.0, 1.0]`.
  ///
  /// Out-of-range coordinates are clamped, with one warning, so the call
  /// always produces a pixel. The continuous coordinate rounds to the
  /// nearest pixel index.
  #[must_use]
  pub fn sample_normalized(&self, x: f32, y: f32) -> Rgba8 {
    let cx = x.clamp(0.0, 1.0);
    let cy = y.clamp(0.0, 1.0);
    // NaN fails both comparisons below and falls through as 0
    if cx != x || cy != y {
      log::warn!("sample_normalized({x}, {y}) outside [0, 1], clamped");
    }
    let px = ((cx * self.width as f32).round() as u32).min(self.width - 1);
    let py = ((cy * self.height as f32).round() as u32).min(self.height - 1);
    self.sample_indexed(px, py)
  }

  /// Resizes to `new_width` x `new_height` in place.
  ///
  /// Width and height adjust independently; reduction and enlargement
  /// both work. [`ScaleMethod::Bicubic`] currently resamples as bilinear
  /// after a warning.
  pub fn scale(&mut self, new_width: u32, new_height: u32, method: ScaleMethod) -> PixResult<()> {
    if new_width == 0 || new_height == 0 {
      log::error!("can't scale to {new_width}x{new_height}");
      return Err(PixError::InvalidArgument);
    }
    self.require_color_raster("scale")?;
    if new_width == self.width && new_height == self.height {
      return Ok(());
    }
    let method = match method {
      ScaleMethod::Bicubic => {
        log::warn!("bicubic scaling not implemented, falling back to bilinear");
        ScaleMethod::Bilinear
      }
      m => m,
    };

    let mut out: Vec<u8> = Vec::new();
    out.try_reserve_exact(new_width as usize * new_height as usize * self.n_channels)?;
    for y in 0..new_height {
      for x in 0..new_width {
        let p = match method {
          ScaleMethod::Nearest => self
            .sample_normalized(x as f32 / new_width as f32, y as f32 / new_height as f32),
          _ => self.sample_bilinear(x, y, new_width, new_height),
        };
        out.extend_from_slice(&[p.r, p.g, p.b]);
        if self.n_channels == 4 {
          out.push(p.a);
        }
      }
    }
    self.data = out;
    self.width = new_width;
    self.height = new_height;
    Ok(())
  }

  /// Bilinear sample for the output pixel `(x, y)` of a resize to
  /// `new_width` x `new_height`, interpolating between pixel centers.
  fn sample_bilinear(&self, x: u32, y: u32, new_width: u32, new_height: u32) -> Rgba8 {
    let sx = ((x as f32 + 0.5) * self.width as f32 / new_width as f32 - 0.5).max(0.0);
    let sy = ((y as f32 + 0.5) * self.height as f32 / new_height as f32 - 0.5).max(0.0);
    let x0 = (sx.floor() as u32).min(self.width - 1);
    let y0 = (sy.floor() as u32).min(self.height - 1);
    let x1 = (x0 + 1).min(self.width - 1);
    let y1 = (y0 + 1).min(self.height - 1);
    let tx = sx - x0 as f32;
    let ty = sy - y0 as f32;
    let p00 = self.sample_indexed(x0, y0);
    let p10 = self.sample_indexed(x1, y0);
    let p01 = self.sample_indexed(x0, y1);
    let p11 = self.sample_indexed(x1, y1);
    let channel = |c: fn(Rgba8) -> u8| {
      let top = color::lerp(f32::from(c(p00)), f32::from(c(p10)), tx);
      let bottom = color::lerp(f32::from(c(p01)), f32::from(c(p11)), tx);
      color::lerp(top, bottom, ty).round() as u8
    };
    Rgba8 {
      r: channel(|p| p.r),
      g: channel(|p| p.g),
      b: channel(|p| p.b),
      a: channel(|p| p.a),
    }
  }

  /// Converts to the alpha-keyed grayscale the ASCII renderer consumes.
  ///
  /// RGB goes to 0 and the alpha channel receives *inverted* Rec.601
  /// luma, so an opaque white input pixel becomes fully transparent
  /// black. 3-channel rasters are promoted to 4 channels. For the
  /// conventional conversion, see [`desaturate`](Pixmap::desaturate).
  pub fn to_grayscale(&mut self) -> PixResult<()> {
    self.require_color_raster("to_grayscale")?;
    let mut out: Vec<u8> = Vec::new();
    out.try_reserve_exact(self.width as usize * self.height as usize * 4)?;
    for px in self.data.chunks_exact(self.n_channels) {
      let dark = 255 - color::rec601_luma(px[0], px[1], px[2]).round() as u8;
      out.extend_from_slice(&[0, 0, 0, dark]);
    }
    self.data = out;
    self.n_channels = 4;
    Ok(())
  }

  /// The conventional grayscale: R = G = B = Rec.601 luma, alpha
  /// untouched.
  pub fn desaturate(&mut self) -> PixResult<()> {
    self.require_color_raster("desaturate")?;
    for px in self.data.chunks_exact_mut(self.n_channels) {
      let y = color::rec601_luma(px[0], px[1], px[2]).round() as u8;
      px[0] = y;
      px[1] = y;
      px[2] = y;
    }
    Ok(())
  }

  /// Snaps every pixel to black or white by Rec.601 luma against
  /// `threshold`. Alpha is preserved.
  pub fn to_monochrome(&mut self, threshold: u8) -> PixResult<()> {
    self.require_color_raster("to_monochrome")?;
    for px in self.data.chunks_exact_mut(self.n_channels) {
      let v = if color::rec601_luma(px[0], px[1], px[2]).round() as u8 >= threshold {
        255
      } else {
        0
      };
      px[0] = v;
      px[1] = v;
      px[2] = v;
    }
    Ok(())
  }

  /// Rotates 90° clockwise, in place: `(x, y)` lands at
  /// `(height - 1 - y, x)` in the new raster.
  pub fn rotate_cw(&mut self) -> PixResult<()> {
    self.rotate(true)
  }

  /// Rotates 90° counter-clockwise, in place: `(x, y)` lands at
  /// `(y, width - 1 - x)` in the new raster.
  pub fn rotate_ccw(&mut self) -> PixResult<()> {
    self.rotate(false)
  }

  // The mapping is a bijection on the pixel grid, so every source pixel
  // lands in bounds and every destination pixel is written once.
  fn rotate(&mut self, clockwise: bool) -> PixResult<()> {
    let bpp = self.bytes_per_pixel();
    let (new_width, new_height) = (self.height, self.width);
    let new_scanline = new_width as usize * bpp;
    let mut out: Vec<u8> = Vec::new();
    out.try_reserve_exact(self.data.len())?;
    out.resize(self.data.len(), 0);
    for y in 0..self.height {
      for x in 0..self.width {
        let (nx, ny) = if clockwise {
          (self.height - 1 - y, x)
        } else {
          (y, self.width - 1 - x)
        };
        let src = self.pixel_offset(x, y);
        let dst = (ny as usize) * new_scanline + (nx as usize) * bpp;
        out[dst..dst + bpp].copy_from_slice(&self.data[src..src + bpp]);
      }
    }
    self.data = out;
    self.width = new_width;
    self.height = new_height;
    Ok(())
  }

  fn require_color_raster(&self, op: &str) -> PixResult<()> {
    if self.bit_depth != 8 || !matches!(self.n_channels, 3 | 4) {
      log::error!(
        "{op} needs an RGB or RGBA raster at bit depth 8, this one has {} channels at bit \
         depth {}",
        self.n_channels,
        self.bit_depth
      );
      return Err(PixError::UnsupportedFormat);
    }
    Ok(())
  }
}
