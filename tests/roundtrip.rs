use qoi::{qoi_decode, qoi_encode, ChannelMode, Colorspace, DecodeError, QoiDescriptor};
use std::io::Cursor;

fn desc(width: usize, height: usize, channels: ChannelMode) -> QoiDescriptor {
    QoiDescriptor {
        width,
        height,
        channels,
        colorspace: Colorspace::Linear,
    }
}

fn lcg_pixels(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 33) as u8
        })
        .collect()
}

#[test]
fn round_trip_is_byte_identical_for_random_rgba_raster() {
    let d = desc(37, 23, ChannelMode::Rgba);
    let pixels = lcg_pixels(42, d.width * d.height * 4);
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let (decoded, out_desc) = qoi_decode(Cursor::new(bytes), None).unwrap();
    assert_eq!(decoded, pixels);
    assert_eq!(out_desc, d);
}

#[test]
fn round_trip_is_byte_identical_for_random_rgb_raster() {
    let d = desc(19, 11, ChannelMode::Rgb);
    let pixels = lcg_pixels(7, d.width * d.height * 3);
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let (decoded, out_desc) = qoi_decode(Cursor::new(bytes), None).unwrap();
    assert_eq!(decoded, pixels);
    assert_eq!(out_desc, d);
}

#[test]
fn encode_is_deterministic() {
    let d = desc(12, 9, ChannelMode::Rgba);
    let pixels = lcg_pixels(99, d.width * d.height * 4);
    let a = qoi_encode(&pixels, &d).unwrap();
    let b = qoi_encode(&pixels, &d).unwrap();
    assert_eq!(a, b);
}

#[test]
fn every_encoded_stream_starts_with_magic() {
    let d = desc(3, 3, ChannelMode::Rgb);
    let pixels = lcg_pixels(1, 27);
    let bytes = qoi_encode(&pixels, &d).unwrap();
    assert_eq!(&bytes[0..4], &[0x71, 0x6F, 0x69, 0x66]);
}

#[test]
fn every_encoded_stream_ends_with_the_padding_marker() {
    let d = desc(3, 3, ChannelMode::Rgb);
    let pixels = lcg_pixels(2, 27);
    let bytes = qoi_encode(&pixels, &d).unwrap();
    assert_eq!(&bytes[bytes.len() - 8..], &[0, 0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn one_by_one_image_is_header_chunk_marker() {
    let d = desc(1, 1, ChannelMode::Rgb);
    let bytes = qoi_encode(&[10, 20, 30], &d).unwrap();
    // 14 byte header + a single chunk (RGB fallback, since delta from the
    // initial register is too large for DIFF/LUMA) + 8 byte marker.
    assert_eq!(bytes.len(), 14 + 4 + 8);
}

#[test]
fn all_zero_opaque_image_ten_by_one_is_one_run_chunk() {
    // All-black, fully opaque pixels equal the initial register exactly, so
    // all 10 collapse into a single RUN chunk from the very first pixel.
    let d = desc(10, 1, ChannelMode::Rgb);
    let pixels = vec![0u8; 10 * 3];
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let body = &bytes[14..bytes.len() - 8];
    assert_eq!(body, &[0xC0 | 9]);
}

#[test]
fn all_zero_rgba_image_hits_the_uninitialised_index_slot_first() {
    // Unlike the opaque case above, (0,0,0,0) differs from the initial
    // register in alpha, so it cannot join a run against it. It does,
    // however, coincide with the table's zero-initialised slot 0 (the
    // INDEX case is checked before the RUN/alpha checks), so the first
    // pixel is an INDEX hit and only the remaining 9 form a run.
    let d = desc(10, 1, ChannelMode::Rgba);
    let pixels = vec![0u8; 10 * 4];
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let body = &bytes[14..bytes.len() - 8];
    assert_eq!(body, &[0x00, 0xC0 | 8]);
}

#[test]
fn exactly_62_identical_pixels_is_a_single_run_chunk() {
    let d = desc(62, 1, ChannelMode::Rgb);
    let pixels = vec![0u8; 62 * 3];
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let body = &bytes[14..bytes.len() - 8];
    assert_eq!(body, &[0xC0 | 61]);
}

#[test]
fn sixty_three_identical_pixels_splits_into_two_runs() {
    let d = desc(63, 1, ChannelMode::Rgb);
    let pixels = vec![0u8; 63 * 3];
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let body = &bytes[14..bytes.len() - 8];
    assert_eq!(body, &[0xC0 | 61, 0xC0 | 0]);
}

#[test]
fn rgba_pixel_with_changed_alpha_matches_spec_example() {
    let d = desc(1, 1, ChannelMode::Rgba);
    let bytes = qoi_encode(&[10, 20, 30, 40], &d).unwrap();
    assert_eq!(&bytes[14..19], &[0xFF, 0x0A, 0x14, 0x1E, 0x28]);
}

#[test]
fn header_fields_round_trip_through_decode() {
    let d = QoiDescriptor {
        width: 300,
        height: 200,
        channels: ChannelMode::Rgba,
        colorspace: Colorspace::Srgb,
    };
    let pixels = vec![0u8; 300 * 200 * 4];
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let (_decoded, out_desc) = qoi_decode(Cursor::new(bytes), None).unwrap();
    assert_eq!(out_desc, d);
}

#[test]
fn table_stays_coherent_across_a_run_then_diff_then_index_sequence() {
    // (5,5,5,255) repeated, a distinct pixel, then (5,5,5,255) again should
    // hit the table (QOI_OP_INDEX) on its third appearance.
    let pixels: Vec<u8> = vec![5, 5, 5, 5, 5, 5, 9, 1, 2, 5, 5, 5];
    let d = desc(4, 1, ChannelMode::Rgb);
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let (decoded, _) = qoi_decode(Cursor::new(bytes.clone()), None).unwrap();
    assert_eq!(decoded, pixels);
    // hash(5,5,5,255) = (15 + 25 + 35 + 2805) % 64 == 0, so the third
    // occurrence of (5,5,5) is an INDEX chunk with tag byte exactly 0x00,
    // the last body byte before the end marker.
    let body = &bytes[14..bytes.len() - 8];
    assert_eq!(*body.last().unwrap(), 0x00);
}

#[test]
fn decoder_never_mistakes_rgb_or_rgba_tag_for_a_run() {
    // Pixels chosen so the encoder must fall back to RGB/RGBA (large deltas,
    // alternating alpha) rather than RUN/DIFF/LUMA/INDEX.
    let pixels = [1u8, 2, 3, 255, 250, 200, 128, 128, 128, 250, 250, 250, 255, 255, 255];
    let d = desc(5, 1, ChannelMode::Rgb);
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let (decoded, _) = qoi_decode(Cursor::new(bytes), None).unwrap();
    assert_eq!(decoded, pixels);
}

#[test]
fn rejects_bad_magic() {
    let d = desc(1, 1, ChannelMode::Rgb);
    let mut bytes = qoi_encode(&[1, 2, 3], &d).unwrap();
    bytes[0] = b'x';
    let err = qoi_decode(Cursor::new(bytes), None).unwrap_err();
    assert!(matches!(err, DecodeError::BadMagic));
}

#[test]
fn rejects_truncated_stream() {
    let d = desc(4, 1, ChannelMode::Rgb);
    let pixels = lcg_pixels(3, 12);
    let mut bytes = qoi_encode(&pixels, &d).unwrap();
    bytes.truncate(bytes.len() - 10);
    let err = qoi_decode(Cursor::new(bytes), None).unwrap_err();
    assert!(matches!(err, DecodeError::Truncated));
}

#[test]
fn rejects_raster_length_mismatch_on_encode() {
    let d = desc(4, 1, ChannelMode::Rgb);
    let err = qoi_encode(&[1, 2, 3], &d).unwrap_err();
    assert_eq!(err, qoi::EncodeError::RasterSizeMismatch);
}

#[test]
fn three_channel_stream_never_changes_alpha() {
    // Even though the decoder's internal register carries alpha, a 3-channel
    // output buffer must never include an alpha byte and must always be as
    // if alpha had stayed 255 throughout.
    let d = desc(5, 1, ChannelMode::Rgb);
    let pixels = lcg_pixels(11, 15);
    let bytes = qoi_encode(&pixels, &d).unwrap();
    let (decoded, out_desc) = qoi_decode(Cursor::new(bytes), None).unwrap();
    assert_eq!(decoded.len(), 15);
    assert_eq!(out_desc.channels, ChannelMode::Rgb);
}
