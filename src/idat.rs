use crate::{Chunk, PixResult};

/// The concatenated payloads of a PNG's IDAT run.
///
/// PNG allows the zlib stream to be split across any number of
/// consecutive IDAT chunks at arbitrary byte boundaries; appending the
/// payloads in file order restores the single stream the inflator wants.
#[derive(Debug, Clone, Default)]
pub struct IdatBuffer {
  data: Vec<u8>,
}
impl IdatBuffer {
  #[must_use]
  pub const fn new() -> Self {
    Self { data: Vec::new() }
  }

  /// Copies `chunk`'s payload onto the end of the buffer.
  pub fn append(&mut self, chunk: Chunk<'_>) -> PixResult<()> {
    self.data.try_reserve(chunk.data.len())?;
    self.data.extend_from_slice(chunk.data);
    Ok(())
  }

  /// The assembled zlib stream so far.
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }
}
