use std::path::{Path, PathBuf};

use crate::{decode, is_png_signature, PixError, PixResult, Pixmap};

/// An opened PNG file: where it came from, plus a full in-memory copy of
/// its bytes.
///
/// The buffer is the single source of truth — no OS file handle is kept
/// once [`open`](PngFile::open) returns, so there's no cursor to drift out
/// of sync with it. Dropping the value releases everything.
#[derive(Debug, Clone)]
pub struct PngFile {
  path: PathBuf,
  bytes: Vec<u8>,
}
impl PngFile {
  /// Reads the whole file and checks the PNG signature.
  pub fn open<P: AsRef<Path>>(path: P) -> PixResult<Self> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
      log::error!("can't read {}: {e}", path.display());
      PixError::Io
    })?;
    if !is_png_signature(&bytes) {
      log::error!("{} is not a PNG (bad signature)", path.display());
      return Err(PixError::NotPng);
    }
    log::debug!("read {} ({} bytes)", path.display(), bytes.len());
    Ok(Self { path: path.to_owned(), bytes })
  }

  /// Wraps bytes that are already in memory, checking the signature. The
  /// path comes back empty.
  pub fn from_bytes(bytes: Vec<u8>) -> PixResult<Self> {
    if !is_png_signature(&bytes) {
      log::error!("byte buffer is not a PNG (bad signature)");
      return Err(PixError::NotPng);
    }
    Ok(Self { path: PathBuf::new(), bytes })
  }

  /// Where the bytes came from, if they came from a file.
  #[must_use]
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// The full file contents.
  #[must_use]
  pub fn bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// Runs the decode pipeline over the in-memory copy.
  pub fn decode(&self) -> PixResult<Pixmap> {
    decode(&self.bytes)
  }
}
