//! ASCII-art output: one glyph per pixel, one line per row.

use std::path::Path;

use crate::color::rec709_luma;
use crate::{PixError, PixResult, Pixmap};

/// The ten-glyph brightness ramp, most ink last.
pub const GLYPH_RAMP: [u8; 10] = *b" .:-=+*#%@";

/// Renders `pixmap` as ASCII art: `height` lines of `width` glyphs, each
/// line terminated by `\n`.
///
/// 3-channel rasters index the ramp by Rec.709 luma. 4-channel rasters
/// key off alpha instead, inverted, because [`Pixmap::to_grayscale`]
/// stores darkness there; both paths send white to `@` and black to the
/// space glyph.
pub fn ascii_art(pixmap: &Pixmap) -> PixResult<String> {
  if pixmap.bit_depth() != 8 || !matches!(pixmap.n_channels(), 3 | 4) {
    log::error!(
      "ASCII output needs an RGB or RGBA raster at bit depth 8, this one has {} channels \
       at bit depth {}",
      pixmap.n_channels(),
      pixmap.bit_depth()
    );
    return Err(PixError::UnsupportedFormat);
  }
  let mut out = String::new();
  out.try_reserve((pixmap.width() as usize + 1) * pixmap.height() as usize)?;
  for row in pixmap.data().chunks_exact(pixmap.bytes_per_scanline()) {
    for px in row.chunks_exact(pixmap.n_channels()) {
      let idx: i32 = if pixmap.n_channels() == 4 {
        let luma = f32::from(px[3]) / 255.0 + 0.193;
        10 - ((luma * 10.0).round() as i32 - 1)
      } else {
        let luma = rec709_luma(px[0], px[1], px[2]);
        (luma * 10.0).round() as i32 - 1
      };
      out.push(GLYPH_RAMP[idx.clamp(0, 9) as usize] as char);
    }
    out.push('\n');
  }
  Ok(out)
}

/// Writes [`ascii_art`] to a text file.
pub fn write_ascii<P: AsRef<Path>>(pixmap: &Pixmap, path: P) -> PixResult<()> {
  let path = path.as_ref();
  let text = ascii_art(pixmap)?;
  std::fs::write(path, text.as_bytes()).map_err(|e| {
    log::error!("can't write {}: {e}", path.display());
    PixError::Io
  })
}
