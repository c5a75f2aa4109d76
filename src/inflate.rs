use miniz_oxide::inflate::stream::{inflate, InflateState};
use miniz_oxide::{DataFormat, MZFlush, MZStatus};

use crate::{IdatBuffer, Ihdr, PixError, PixResult};

/// The method nibble of a zlib CMF byte that means "deflate".
const CM_DEFLATE: u8 = 8;

/// Inflates the assembled IDAT payload into the filtered scanline stream.
///
/// The output length is exact: [`Ihdr::decompressed_len`] bytes, one
/// filter byte plus one scanline of packed pixels per image row. Anything
/// else the stream does — bad zlib header, bad data, stalling, running
/// short or long — is [`DecompressionFailed`]. The decompressor is
/// finalized on every exit path (it drops with `state`).
///
/// [`DecompressionFailed`]: PixError::DecompressionFailed
pub fn decompress_idat(ihdr: &Ihdr, idat: &IdatBuffer) -> PixResult<Vec<u8>> {
  let src = idat.as_bytes();
  match src.first() {
    Some(cmf) if cmf & 0x0F == CM_DEFLATE => (),
    Some(cmf) => {
      log::error!("zlib stream declares compression method {}, wanted {CM_DEFLATE}", cmf & 0x0F);
      return Err(PixError::DecompressionFailed);
    }
    None => {
      log::error!("empty IDAT payload");
      return Err(PixError::DecompressionFailed);
    }
  }

  let want = ihdr.decompressed_len();
  let mut out: Vec<u8> = Vec::new();
  out.try_reserve_exact(want)?;
  out.resize(want, 0);

  let mut state = InflateState::new_boxed(DataFormat::Zlib);
  let mut in_pos = 0_usize;
  let mut out_pos = 0_usize;
  loop {
    let res = inflate(&mut state, &src[in_pos..], &mut out[out_pos..], MZFlush::None);
    let stalled = res.bytes_consumed == 0 && res.bytes_written == 0;
    in_pos += res.bytes_consumed;
    out_pos += res.bytes_written;
    match res.status {
      Ok(MZStatus::StreamEnd) => break,
      Ok(MZStatus::Ok) if !stalled => (),
      Ok(MZStatus::Ok) => {
        log::error!("zlib stream stalled at input byte {in_pos} of {}", src.len());
        return Err(PixError::DecompressionFailed);
      }
      Ok(MZStatus::NeedDict) => {
        log::error!("zlib stream wants a preset dictionary, which PNG forbids");
        return Err(PixError::DecompressionFailed);
      }
      Err(e) => {
        log::error!("inflate failed at input byte {in_pos}: {e:?}");
        return Err(PixError::DecompressionFailed);
      }
    }
  }
  if out_pos != want {
    log::error!("IDAT inflated to {out_pos} bytes, expected exactly {want}");
    return Err(PixError::DecompressionFailed);
  }
  Ok(out)
}
