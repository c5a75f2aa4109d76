use pngpix::{decode, ChunkReader, ChunkType, ColorType, PixError, PngFile, PNG_SIGNATURE};

use super::{chunk, ihdr_payload, png_bytes, rand_bytes};

#[test]
fn decode_1x1_rgb_red() {
  let png = png_bytes(1, 1, ColorType::Rgb, &[0, 0xFF, 0x00, 0x00]);
  let pixmap = decode(&png).unwrap();
  assert_eq!(pixmap.width(), 1);
  assert_eq!(pixmap.height(), 1);
  assert_eq!(pixmap.n_channels(), 3);
  assert_eq!(pixmap.bit_depth(), 8);
  assert_eq!(pixmap.data(), &[0xFF, 0x00, 0x00]);
}

#[test]
fn decode_2x2_rgba_unfiltered_rows_pass_through() {
  #[rustfmt::skip]
  let filtered = [
    0, 0xFF, 0x00, 0x00, 0xFF,  0x00, 0xFF, 0x00, 0xFF,
    0, 0x00, 0x00, 0xFF, 0xFF,  0xFF, 0xFF, 0xFF, 0x80,
  ];
  let png = png_bytes(2, 2, ColorType::Rgba, &filtered);
  let pixmap = decode(&png).unwrap();
  assert_eq!(pixmap.n_channels(), 4);
  #[rustfmt::skip]
  assert_eq!(
    pixmap.data(),
    &[
      0xFF, 0x00, 0x00, 0xFF,  0x00, 0xFF, 0x00, 0xFF,
      0x00, 0x00, 0xFF, 0xFF,  0xFF, 0xFF, 0xFF, 0x80,
    ]
  );
}

#[test]
fn decode_up_filtered_row_adds_bytewise_mod_256() {
  #[rustfmt::skip]
  let filtered = [
    0, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60,
    2, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06,
  ];
  let png = png_bytes(2, 2, ColorType::Rgb, &filtered);
  let pixmap = decode(&png).unwrap();
  #[rustfmt::skip]
  assert_eq!(
    pixmap.data(),
    &[
      0x10, 0x20, 0x30, 0x40, 0x50, 0x60,
      0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
    ]
  );
}

#[test]
fn decode_is_deterministic() {
  let mut filtered = vec![0_u8; (5 * 3 + 1) * 4];
  for (i, b) in filtered.iter_mut().enumerate() {
    *b = (i % 251) as u8;
  }
  // make the filter bytes legal (rows of 16 bytes each)
  for row in filtered.chunks_mut(16) {
    row[0] %= 5;
  }
  let png = png_bytes(5, 4, ColorType::Rgb, &filtered);
  let a = decode(&png).unwrap();
  let b = decode(&png).unwrap();
  assert_eq!(a, b);
  assert_eq!(a.data().len(), 5 * 3 * 4);
}

#[test]
fn signature_rejection() {
  let mut png = png_bytes(1, 1, ColorType::Rgb, &[0, 1, 2, 3]);
  png[0] ^= 0x01;
  assert_eq!(decode(&png), Err(PixError::NotPng));
  assert!(matches!(PngFile::from_bytes(png), Err(PixError::NotPng)));
  assert_eq!(decode(b"not a png at all"), Err(PixError::NotPng));
}

#[test]
fn idat_split_across_chunks_decodes() {
  let filtered = [0, 1, 2, 3, 0, 4, 5, 6];
  let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, 6);
  let (head, tail) = compressed.split_at(compressed.len() / 2);
  let mut png = Vec::new();
  png.extend_from_slice(&PNG_SIGNATURE);
  png.extend_from_slice(&chunk(ChunkType::IHDR, &ihdr_payload(1, 2, 8, 2)));
  png.extend_from_slice(&chunk(ChunkType::IDAT, head));
  png.extend_from_slice(&chunk(ChunkType::IDAT, tail));
  png.extend_from_slice(&chunk(ChunkType::IEND, &[]));
  let pixmap = decode(&png).unwrap();
  assert_eq!(pixmap.data(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn non_consecutive_idat_is_malformed() {
  let filtered = [0, 1, 2, 3, 0, 4, 5, 6];
  let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, 6);
  let (head, tail) = compressed.split_at(compressed.len() / 2);
  let mut png = Vec::new();
  png.extend_from_slice(&PNG_SIGNATURE);
  png.extend_from_slice(&chunk(ChunkType::IHDR, &ihdr_payload(1, 2, 8, 2)));
  png.extend_from_slice(&chunk(ChunkType::IDAT, head));
  png.extend_from_slice(&chunk(ChunkType(*b"tEXt"), b"comment\0between idats"));
  png.extend_from_slice(&chunk(ChunkType::IDAT, tail));
  png.extend_from_slice(&chunk(ChunkType::IEND, &[]));
  assert_eq!(decode(&png), Err(PixError::MalformedChunk));
}

#[test]
fn ancillary_chunks_before_idat_are_skipped() {
  let filtered = [0, 9, 8, 7];
  let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, 6);
  let mut png = Vec::new();
  png.extend_from_slice(&PNG_SIGNATURE);
  png.extend_from_slice(&chunk(ChunkType::IHDR, &ihdr_payload(1, 1, 8, 2)));
  png.extend_from_slice(&chunk(ChunkType(*b"gAMA"), &45455_u32.to_be_bytes()));
  png.extend_from_slice(&chunk(ChunkType(*b"tEXt"), b"Title\0skipped"));
  png.extend_from_slice(&chunk(ChunkType::IDAT, &compressed));
  png.extend_from_slice(&chunk(ChunkType::IEND, &[]));
  assert_eq!(decode(&png).unwrap().data(), &[9, 8, 7]);
}

#[test]
fn missing_idat_is_malformed() {
  let mut png = Vec::new();
  png.extend_from_slice(&PNG_SIGNATURE);
  png.extend_from_slice(&chunk(ChunkType::IHDR, &ihdr_payload(1, 1, 8, 2)));
  png.extend_from_slice(&chunk(ChunkType::IEND, &[]));
  assert_eq!(decode(&png), Err(PixError::MalformedChunk));
}

#[test]
fn first_chunk_must_be_ihdr() {
  let mut png = Vec::new();
  png.extend_from_slice(&PNG_SIGNATURE);
  png.extend_from_slice(&chunk(ChunkType(*b"gAMA"), &45455_u32.to_be_bytes()));
  png.extend_from_slice(&chunk(ChunkType::IHDR, &ihdr_payload(1, 1, 8, 2)));
  png.extend_from_slice(&chunk(ChunkType::IEND, &[]));
  assert_eq!(decode(&png), Err(PixError::MalformedChunk));
}

#[test]
fn truncated_file_is_malformed() {
  let png = png_bytes(2, 2, ColorType::Rgb, &[0; 14]);
  // cut into the IEND chunk's CRC
  assert_eq!(decode(&png[..png.len() - 2]), Err(PixError::MalformedChunk));
  // cut into the IDAT data
  assert_eq!(decode(&png[..30]), Err(PixError::MalformedChunk));
}

#[test]
fn corrupt_idat_fails_decompression() {
  let filtered = [0, 1, 2, 3];
  let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, 6);
  let mut png = Vec::new();
  png.extend_from_slice(&PNG_SIGNATURE);
  png.extend_from_slice(&chunk(ChunkType::IHDR, &ihdr_payload(1, 1, 8, 2)));
  let mut corrupted = compressed.clone();
  corrupted[1] ^= 0xFF;
  png.extend_from_slice(&chunk(ChunkType::IDAT, &corrupted));
  png.extend_from_slice(&chunk(ChunkType::IEND, &[]));
  assert_eq!(decode(&png), Err(PixError::DecompressionFailed));
}

#[test]
fn unsupported_layouts_are_rejected() {
  for (bit_depth, color_type) in [(8_u8, 0_u8), (8, 3), (8, 4), (16, 2), (16, 6)] {
    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    png.extend_from_slice(&chunk(ChunkType::IHDR, &ihdr_payload(1, 1, bit_depth, color_type)));
    png.extend_from_slice(&chunk(ChunkType::IEND, &[]));
    assert_eq!(
      decode(&png),
      Err(PixError::UnsupportedFormat),
      "bit depth {bit_depth}, color type {color_type}"
    );
  }
}

#[test]
fn crc_mismatch_is_not_fatal() {
  let mut png = png_bytes(1, 1, ColorType::Rgb, &[0, 10, 20, 30]);
  // corrupt the IHDR chunk's CRC field (last of its 25 bytes)
  let crc_pos = 8 + 8 + 13 + 3;
  png[crc_pos] ^= 0xFF;
  assert_eq!(decode(&png).unwrap().data(), &[10, 20, 30]);
}

#[test]
fn random_bytes_never_panic() {
  // hostile input should error out, never panic
  for _ in 0..10 {
    let v = rand_bytes(1024);
    let _ = decode(&v);

    // even with a valid signature stapled on the front
    let mut with_sig = PNG_SIGNATURE.to_vec();
    with_sig.extend_from_slice(&v);
    let _ = decode(&with_sig);

    let mut reader = ChunkReader::new(&v);
    while let Ok(chunk) = reader.read() {
      if chunk.chunk_type == ChunkType::IEND {
        break;
      }
    }
  }
}
