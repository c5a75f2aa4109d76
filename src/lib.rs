#![forbid(unsafe_code)]

//! A PNG decoder and a small pixmap toolkit built on top of it.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! The decode pipeline consumes a PNG byte stream in one left-to-right
//! pass:
//!
//! 1. [`PngFile::open`] pulls the whole file into memory and checks the
//!    8-byte signature. The in-memory buffer is the single source of truth
//!    from then on.
//! 2. [`ChunkReader`] frames the stream into length/type/data/CRC chunks.
//! 3. [`Ihdr::from_chunk`] decodes and validates the image header.
//! 4. The consecutive `IDAT` run is concatenated into an [`IdatBuffer`].
//! 5. [`decompress_idat`] drives the zlib decompressor over that buffer,
//!    yielding the filtered scanline stream.
//! 6. [`reconstruct_into`] reverses the per-scanline filters and packs the
//!    bare pixel rows into a [`Pixmap`].
//!
//! [`decode`] runs the whole pipeline over a byte slice; [`PngFile`] adds
//! the file lifecycle on top.
//!
//! The [`Pixmap`] then supports sampling, scaling, grayscale conversion,
//! 90° rotation, binary PPM export ([`write_ppm`]), and ASCII-art
//! rendering ([`write_ascii`]).
//!
//! Only truecolor images (color types 2 and 6) at bit depth 8 decode to
//! pixels. Palette, grayscale, 16-bit, and interlaced images are rejected
//! with [`PixError::UnsupportedFormat`]; ancillary chunks are skipped.
//!
//! Diagnostics go through the [`log`] facade: each failure produces
//! exactly one `error!` record at its point of origin, recoverable
//! oddities (clamped arguments, CRC mismatches) produce one `warn!`.

mod error;
pub use error::*;

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

mod idat;
pub use idat::*;

mod inflate;
pub use inflate::*;

mod unfilter;
pub use unfilter::*;

mod decoder;
pub use decoder::*;

mod handle;
pub use handle::*;

pub mod color;
pub use color::{Rgb8, Rgba8};

mod pixmap;
pub use pixmap::*;

mod netpbm;
pub use netpbm::*;

mod ascii;
pub use ascii::*;
