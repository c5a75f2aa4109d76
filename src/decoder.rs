use crate::{
  decompress_idat, is_png_signature, reconstruct_into, Chunk, ChunkReader, ChunkType, IdatBuffer,
  Ihdr, PixError, PixResult, Pixmap,
};

/// Where the chunk walk stands relative to the IDAT run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdatRun {
  NotSeen,
  Running,
  Closed,
}

/// Decodes one PNG byte stream into a [`Pixmap`].
///
/// The stream is consumed in a single left-to-right pass: signature, IHDR,
/// any ancillary chunks (skipped), one consecutive IDAT run, IEND. The
/// assembled IDAT payload is then inflated and the scanline filters
/// reversed.
///
/// Chunk ordering is enforced: the first chunk must be IHDR, and once a
/// non-IDAT chunk follows the IDAT run, a further IDAT is
/// [`MalformedChunk`]. Reaching IEND without any IDAT is also
/// [`MalformedChunk`].
///
/// [`MalformedChunk`]: PixError::MalformedChunk
pub fn decode(bytes: &[u8]) -> PixResult<Pixmap> {
  if !is_png_signature(bytes) {
    log::error!("missing PNG signature");
    return Err(PixError::NotPng);
  }
  let mut reader = ChunkReader::new(&bytes[8..]);

  let first = reader.read()?;
  check_crc(&first);
  let ihdr = Ihdr::from_chunk(first)?;
  log::debug!(
    "IHDR: {}x{} {:?} at bit depth {}",
    ihdr.width,
    ihdr.height,
    ihdr.color_type,
    ihdr.bit_depth
  );

  let mut idat = IdatBuffer::new();
  let mut run = IdatRun::NotSeen;
  loop {
    let chunk = reader.read()?;
    check_crc(&chunk);
    match chunk.chunk_type {
      ChunkType::IEND => break,
      ChunkType::IDAT => match run {
        IdatRun::NotSeen | IdatRun::Running => {
          run = IdatRun::Running;
          idat.append(chunk)?;
        }
        IdatRun::Closed => {
          log::error!("IDAT chunk after the IDAT run already ended");
          return Err(PixError::MalformedChunk);
        }
      },
      other => {
        if run == IdatRun::Running {
          run = IdatRun::Closed;
        }
        log::debug!("skipping {:?} chunk ({} bytes)", other, chunk.length);
      }
    }
  }
  if run == IdatRun::NotSeen {
    log::error!("no IDAT chunk before IEND");
    return Err(PixError::MalformedChunk);
  }
  log::debug!("assembled {} bytes of compressed image data", idat.len());

  let mut filtered = decompress_idat(&ihdr, &idat)?;
  let mut data: Vec<u8> = Vec::new();
  reconstruct_into(&ihdr, &mut filtered, &mut data)?;
  Ok(Pixmap::from_raster(&ihdr, data))
}

/// Advisory only: a CRC mismatch is logged, never fatal.
fn check_crc(chunk: &Chunk<'_>) {
  if !chunk.crc_matches() {
    log::warn!(
      "{:?} chunk CRC mismatch: declared {:#010x}, computed {:#010x}",
      chunk.chunk_type,
      chunk.declared_crc,
      chunk.actual_crc()
    );
  }
}
