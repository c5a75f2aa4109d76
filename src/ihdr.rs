use crate::{Chunk, ChunkType, PixError, PixResult};

/// The color kinds PNG defines.
///
/// Only [`Rgb`](ColorType::Rgb) and [`Rgba`](ColorType::Rgba) make it past
/// header validation; the others are recognized so they can be rejected by
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorType {
  /// Greyscale.
  Gray = 0,
  /// Red, Green, Blue.
  Rgb = 2,
  /// Index into a palette.
  Indexed = 3,
  /// Greyscale + Alpha.
  GrayAlpha = 4,
  /// Red, Green, Blue, Alpha.
  Rgba = 6,
}
impl ColorType {
  /// Samples per pixel for this color kind.
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Gray => 1,
      Self::Rgb => 3,
      Self::Indexed => 1,
      Self::GrayAlpha => 2,
      Self::Rgba => 4,
    }
  }

  /// The bit depths PNG allows for this color kind.
  const fn allows_bit_depth(self, bit_depth: u8) -> bool {
    match self {
      Self::Gray => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
      Self::Indexed => matches!(bit_depth, 1 | 2 | 4 | 8),
      Self::Rgb | Self::GrayAlpha | Self::Rgba => matches!(bit_depth, 8 | 16),
    }
  }
}
impl TryFrom<u8> for ColorType {
  type Error = PixError;
  fn try_from(value: u8) -> PixResult<Self> {
    Ok(match value {
      0 => ColorType::Gray,
      2 => ColorType::Rgb,
      3 => ColorType::Indexed,
      4 => ColorType::GrayAlpha,
      6 => ColorType::Rgba,
      other => {
        log::error!("illegal color type {other}");
        return Err(PixError::MalformedChunk);
      }
    })
  }
}

/// The decoded image header.
///
/// All multi-byte fields are host order here; [`Ihdr::from_chunk`] does
/// the big-endian reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ihdr {
  /// Width in pixels. Never zero.
  pub width: u32,
  /// Height in pixels. Never zero.
  pub height: u32,
  /// Bits per channel. Always 8 after validation.
  pub bit_depth: u8,
  /// Pixel color kind. [`Rgb`](ColorType::Rgb) or [`Rgba`](ColorType::Rgba)
  /// after validation.
  pub color_type: ColorType,
  /// Always 0 (deflate), the only method PNG defines.
  pub compression_method: u8,
  /// Always 0 (adaptive), the only method PNG defines.
  pub filter_method: u8,
  /// Always 0 after validation; 1 would be Adam7.
  pub interlace_method: u8,
}
impl Ihdr {
  /// Parses and validates the 13-byte IHDR payload.
  ///
  /// Values outside what PNG defines are [`MalformedChunk`]; legal PNG
  /// layouts this decoder doesn't produce pixels for (palette, grayscale,
  /// bit depths other than 8, Adam7) are [`UnsupportedFormat`].
  ///
  /// [`MalformedChunk`]: PixError::MalformedChunk
  /// [`UnsupportedFormat`]: PixError::UnsupportedFormat
  pub fn from_chunk(chunk: Chunk<'_>) -> PixResult<Self> {
    if chunk.chunk_type != ChunkType::IHDR || chunk.length != 13 {
      log::error!(
        "expected a 13-byte IHDR chunk, got {:?} with length {}",
        chunk.chunk_type,
        chunk.length
      );
      return Err(PixError::MalformedChunk);
    }
    let width = u32::from_be_bytes(chunk.data[0..4].try_into().unwrap());
    let height = u32::from_be_bytes(chunk.data[4..8].try_into().unwrap());
    let bit_depth = chunk.data[8];
    let color_type = ColorType::try_from(chunk.data[9])?;
    let compression_method = chunk.data[10];
    let filter_method = chunk.data[11];
    let interlace_method = chunk.data[12];

    if width == 0 || height == 0 {
      log::error!("illegal zero dimension: {width}x{height}");
      return Err(PixError::MalformedChunk);
    }
    if compression_method != 0 {
      log::error!("illegal compression method {compression_method}");
      return Err(PixError::MalformedChunk);
    }
    if filter_method != 0 {
      log::error!("illegal filter method {filter_method}");
      return Err(PixError::MalformedChunk);
    }
    if !color_type.allows_bit_depth(bit_depth) {
      log::error!("illegal bit depth {bit_depth} for color type {color_type:?}");
      return Err(PixError::MalformedChunk);
    }
    match interlace_method {
      0 => (),
      1 => {
        log::error!("interlaced (Adam7) images are not supported");
        return Err(PixError::UnsupportedFormat);
      }
      other => {
        log::error!("illegal interlace method {other}");
        return Err(PixError::MalformedChunk);
      }
    }
    if !matches!(color_type, ColorType::Rgb | ColorType::Rgba) || bit_depth != 8 {
      log::error!(
        "unsupported pixel layout: {color_type:?} at bit depth {bit_depth} \
         (only RGB and RGBA at bit depth 8 decode)"
      );
      return Err(PixError::UnsupportedFormat);
    }

    Ok(Self {
      width,
      height,
      bit_depth,
      color_type,
      compression_method,
      filter_method,
      interlace_method,
    })
  }

  /// Samples per pixel.
  #[must_use]
  pub const fn n_channels(&self) -> usize {
    self.color_type.channel_count()
  }

  /// Whole bytes per pixel; the distance the scanline filters predict
  /// over.
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    self.n_channels() * if self.bit_depth > 8 { 2 } else { 1 }
  }

  /// Packed bytes in one scanline, without the filter byte. Sub-byte
  /// depths round up to whole bytes.
  #[must_use]
  pub const fn bytes_per_scanline(&self) -> usize {
    ((self.width as usize) * self.n_channels() * (self.bit_depth as usize) + 7) / 8
  }

  /// Bytes in one wire scanline: the filter byte plus the packed pixels.
  #[must_use]
  pub const fn bytes_per_filterline(&self) -> usize {
    1 + self.bytes_per_scanline()
  }

  /// The exact inflated size of the IDAT stream.
  #[must_use]
  pub const fn decompressed_len(&self) -> usize {
    self.bytes_per_filterline() * (self.height as usize)
  }

  /// The exact size of the final raster.
  #[must_use]
  pub const fn raster_len(&self) -> usize {
    self.bytes_per_scanline() * (self.height as usize)
  }
}
