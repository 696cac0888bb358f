//! The decoder state machine: tagged chunk stream in, raster bytes out.

use std::io::Read;

use crate::cursor::ByteReader;
use crate::error::DecodeError;
use crate::header::{self, ChannelMode, QoiDescriptor};
use crate::pixel::Pixel;
use crate::table::SeenTable;
use crate::QOI_PIXELS_MAX;

const QOI_OP_RGB: u8 = 0xfe;
const QOI_OP_RGBA: u8 = 0xff;
const QOI_MASK: u8 = 0xc0;
const QOI_OP_INDEX: u8 = 0x00;
const QOI_OP_DIFF: u8 = 0x40;
const QOI_OP_LUMA: u8 = 0x80;
const QOI_OP_RUN: u8 = 0xc0;

/// Decode a QOI image from `impl Read`.
///
/// `channels` overrides the output layout (e.g. always expand to RGBA
/// regardless of what the stream declares); pass `None` to use the
/// stream's own channel count.
pub fn qoi_decode(
    mut data: impl Read,
    channels: Option<ChannelMode>,
) -> Result<(Vec<u8>, QoiDescriptor), DecodeError> {
    let mut reader = ByteReader::new(&mut data);
    let desc = header::read_header(&mut reader, channels)?;

    if desc.width == 0 || desc.height == 0 {
        return Err(DecodeError::EmptyImage);
    }
    if desc.height >= QOI_PIXELS_MAX / desc.width {
        return Err(DecodeError::PixelCountOverflow);
    }

    let channels = desc.channels.count();
    let pixel_len = desc.pixel_count() * channels;
    let mut pixels = Vec::with_capacity(pixel_len);

    let mut table = SeenTable::new();
    let mut pixel = Pixel::initial();
    let mut run: u8 = 0;

    for _ in 0..desc.pixel_count() {
        if run > 0 {
            run -= 1;
        } else {
            let op_byte = reader.read_u8().map_err(map_io)?;

            if op_byte == QOI_OP_RGB {
                let mut rgb = [0u8; 3];
                reader.read_bytes(&mut rgb).map_err(map_io)?;
                pixel = Pixel::new(rgb[0], rgb[1], rgb[2], pixel.a);
            } else if op_byte == QOI_OP_RGBA {
                let mut rgba = [0u8; 4];
                reader.read_bytes(&mut rgba).map_err(map_io)?;
                pixel = Pixel::new(rgba[0], rgba[1], rgba[2], rgba[3]);
            } else if (op_byte & QOI_MASK) == QOI_OP_INDEX {
                pixel = table.get(op_byte as usize);
            } else if (op_byte & QOI_MASK) == QOI_OP_DIFF {
                let dr = ((op_byte >> 4) & 0x03) as i8 - 2;
                let dg = ((op_byte >> 2) & 0x03) as i8 - 2;
                let db = (op_byte & 0x03) as i8 - 2;
                pixel = Pixel::new(
                    pixel.r.wrapping_add_signed(dr),
                    pixel.g.wrapping_add_signed(dg),
                    pixel.b.wrapping_add_signed(db),
                    pixel.a,
                );
            } else if (op_byte & QOI_MASK) == QOI_OP_LUMA {
                let delta_byte = reader.read_u8().map_err(|e| {
                    if matches!(e.kind(), std::io::ErrorKind::UnexpectedEof) {
                        DecodeError::Overflow
                    } else {
                        map_io(e)
                    }
                })?;

                let dg = (op_byte & 0x3f) as i8 - 32;
                let dr = dg - 8 + ((delta_byte >> 4) & 0x0f) as i8;
                let db = dg - 8 + (delta_byte & 0x0f) as i8;
                pixel = Pixel::new(
                    pixel.r.wrapping_add_signed(dr),
                    pixel.g.wrapping_add_signed(dg),
                    pixel.b.wrapping_add_signed(db),
                    pixel.a,
                );
            } else {
                debug_assert_eq!(op_byte & QOI_MASK, QOI_OP_RUN);
                run = op_byte & 0x3f;
            }
        }

        // Mirrors the encoder's table write for a freshly resolved pixel
        // (every branch above except a continuing run or an INDEX hit);
        // repeated here unconditionally is harmless since it just re-stores
        // the same value the table already holds in those two cases.
        table.set(pixel.hash(), pixel);

        pixels.push(pixel.r);
        pixels.push(pixel.g);
        pixels.push(pixel.b);
        if channels == 4 {
            pixels.push(pixel.a);
        }
    }

    Ok((pixels, desc))
}

fn map_io(err: std::io::Error) -> DecodeError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        DecodeError::Truncated
    } else {
        DecodeError::Io(err)
    }
}
