//! Binary PPM (`P6`) output.
//!
//! PPM is the simplest raster container there is — an ASCII header and
//! raw RGB bytes — which makes it a handy debugging sink for decoded
//! pixmaps.

use std::path::Path;

use crate::color::{blend, Rgb8, Rgba8};
use crate::{PixError, PixResult, Pixmap};

/// Renders `pixmap` as a binary PPM (`P6`) byte stream.
///
/// The header is `P6\n<width> <height>\n<maxval>\n` with
/// `maxval = 2^bit_depth - 1`, followed by raw RGB rows, top to bottom.
/// PPM has no alpha, so 4-channel pixels are composited over `bg` first.
pub fn ppm_bytes(pixmap: &Pixmap, bg: Rgb8) -> PixResult<Vec<u8>> {
  if pixmap.bit_depth() != 8 || !matches!(pixmap.n_channels(), 3 | 4) {
    log::error!(
      "PPM output needs an RGB or RGBA raster at bit depth 8, this one has {} channels at \
       bit depth {}",
      pixmap.n_channels(),
      pixmap.bit_depth()
    );
    return Err(PixError::UnsupportedFormat);
  }
  let maxval: u32 = (1_u32 << pixmap.bit_depth()) - 1;
  let header = format!("P6\n{} {}\n{}\n", pixmap.width(), pixmap.height(), maxval);
  let body_len = pixmap.width() as usize * pixmap.height() as usize * 3;

  let mut out: Vec<u8> = Vec::new();
  out.try_reserve_exact(header.len() + body_len)?;
  out.extend_from_slice(header.as_bytes());
  match pixmap.n_channels() {
    3 => out.extend_from_slice(pixmap.data()),
    _ => {
      for px in bytemuck::cast_slice::<u8, Rgba8>(pixmap.data()) {
        let Rgb8 { r, g, b } = blend(*px, bg);
        out.extend_from_slice(&[r, g, b]);
      }
    }
  }
  Ok(out)
}

/// Writes [`ppm_bytes`] to a file.
pub fn write_ppm<P: AsRef<Path>>(pixmap: &Pixmap, path: P, bg: Rgb8) -> PixResult<()> {
  let path = path.as_ref();
  let bytes = ppm_bytes(pixmap, bg)?;
  std::fs::write(path, &bytes).map_err(|e| {
    log::error!("can't write {}: {e}", path.display());
    PixError::Io
  })
}
