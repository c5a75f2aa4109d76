use core::fmt::{self, Display};

/// Everything that can go wrong while decoding a PNG or transforming a
/// [`Pixmap`](crate::Pixmap).
///
/// Details that don't fit a `Copy` enum (the OS error, the offending byte
/// offset, the rejected value) are logged at the point of origin, so every
/// failure produces exactly one diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PixError {
  /// A file couldn't be opened, read, or written.
  Io,
  /// The allocator couldn't give us enough space.
  Alloc,
  /// The first 8 bytes were not the PNG signature.
  NotPng,
  /// A legal PNG layout this decoder doesn't produce pixels for: palette,
  /// grayscale, bit depths other than 8, or interlacing.
  UnsupportedFormat,
  /// Chunk framing violated: truncated data, a bad header, an illegal
  /// filter byte, or IDAT chunks that aren't consecutive.
  MalformedChunk,
  /// The zlib stream inside the IDAT run couldn't be inflated, or it
  /// inflated to the wrong size.
  DecompressionFailed,
  /// An argument was out of range and couldn't be clamped away.
  InvalidArgument,
  /// A bug in this crate.
  Internal,
}

/// The usual result alias for this crate.
pub type PixResult<T> = Result<T, PixError>;

impl Display for PixError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      PixError::Io => "i/o failure",
      PixError::Alloc => "out of memory",
      PixError::NotPng => "not a png",
      PixError::UnsupportedFormat => "unsupported pixel format",
      PixError::MalformedChunk => "malformed chunk stream",
      PixError::DecompressionFailed => "image data decompression failed",
      PixError::InvalidArgument => "invalid argument",
      PixError::Internal => "internal error",
    })
  }
}

impl std::error::Error for PixError {}

impl From<std::collections::TryReserveError> for PixError {
  #[inline]
  fn from(e: std::collections::TryReserveError) -> Self {
    log::error!("allocation failure: {e}");
    Self::Alloc
  }
}
