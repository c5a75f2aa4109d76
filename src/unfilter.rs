//! Reversal of PNG's per-scanline filters.
//!
//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the
//! > bit depth or color type of the image.

use crate::{Ihdr, PixError, PixResult};

/// The five per-scanline filter methods PNG defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FilterType {
  None = 0,
  Sub = 1,
  Up = 2,
  Average = 3,
  Paeth = 4,
}
impl TryFrom<u8> for FilterType {
  type Error = PixError;
  fn try_from(value: u8) -> PixResult<Self> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => {
        log::error!("illegal scanline filter type {other}");
        return Err(PixError::MalformedChunk);
      }
    })
  }
}

/// The Paeth predictor: `a + b - c` snapped to whichever of the three
/// neighbors (left, above, upper-left) is closest.
///
/// The PNG spec says the calculation shall be performed exactly, without
/// overflow, so this works in i32; u8 inputs can't trouble that. The spec
/// is also extremely specific that the order of the comparisons shall not
/// be altered.
pub(crate) const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reverses the scanline filters and packs the bare pixel rows onto `out`.
///
/// `filtered` is the inflated IDAT stream: `height` rows, each one filter
/// byte followed by [`Ihdr::bytes_per_scanline`] pixel bytes. Each row is
/// reconstructed in place and then appended, without its filter byte, to
/// `out`.
///
/// The filters predict from *reconstructed* neighbors, never filtered
/// ones: `a` and `c` are taken at a distance of one whole pixel
/// ([`Ihdr::bytes_per_pixel`]) within the current and previous
/// reconstructed rows, `b` straight above in the previous reconstructed
/// row. Row 0 sees an all-zero previous row. Since `out` only ever holds
/// finished rows, "previous reconstructed row" is simply its tail.
pub fn reconstruct_into(ihdr: &Ihdr, filtered: &mut [u8], out: &mut Vec<u8>) -> PixResult<()> {
  let scanline = ihdr.bytes_per_scanline();
  let filterline = ihdr.bytes_per_filterline();
  let bpp = ihdr.bytes_per_pixel();
  let height = ihdr.height as usize;
  if filtered.len() != filterline * height {
    log::error!(
      "filtered stream is {} bytes, expected {} ({} rows of {})",
      filtered.len(),
      filterline * height,
      height,
      filterline
    );
    return Err(PixError::Internal);
  }
  out.try_reserve_exact(ihdr.raster_len())?;

  let zero_row = vec![0_u8; scanline];
  for (y, row) in filtered.chunks_exact_mut(filterline).enumerate() {
    let (filter_byte, line) = row.split_at_mut(1);
    let filter = FilterType::try_from(filter_byte[0])?;
    let prev: &[u8] =
      if y == 0 { &zero_row } else { &out[(y - 1) * scanline..y * scanline] };
    match filter {
      FilterType::None => (),
      FilterType::Sub => {
        // the first pixel's `a` is 0, so it passes through untouched
        for i in bpp..scanline {
          line[i] = line[i].wrapping_add(line[i - bpp]);
        }
      }
      FilterType::Up => {
        for i in 0..scanline {
          line[i] = line[i].wrapping_add(prev[i]);
        }
      }
      FilterType::Average => {
        for i in 0..scanline {
          let a = if i < bpp { 0 } else { line[i - bpp] as u32 };
          let b = prev[i] as u32;
          line[i] = line[i].wrapping_add(((a + b) / 2) as u8);
        }
      }
      FilterType::Paeth => {
        for i in 0..scanline {
          let a = if i < bpp { 0 } else { line[i - bpp] };
          let b = prev[i];
          let c = if i < bpp { 0 } else { prev[i - bpp] };
          line[i] = line[i].wrapping_add(paeth_predict(a, b, c));
        }
      }
    }
    out.extend_from_slice(line);
  }
  Ok(())
}
