//! The encoder state machine: raster bytes in, tagged chunk stream out.

use crate::cursor::ByteWriter;
use crate::error::EncodeError;
use crate::header::{self, ChannelMode, QoiDescriptor};
use crate::pixel::Pixel;
use crate::table::SeenTable;
use crate::QOI_PIXELS_MAX;

const QOI_OP_INDEX: u8 = 0x00;
const QOI_OP_DIFF: u8 = 0x40;
const QOI_OP_LUMA: u8 = 0x80;
const QOI_OP_RUN: u8 = 0xc0;
const QOI_OP_RGB: u8 = 0xfe;
const QOI_OP_RGBA: u8 = 0xff;

/// Encode raw RGB or RGBA pixels into a QOI image in memory.
///
/// `pixels` must be tightly packed, row-major, with `desc.channels.count()`
/// bytes per pixel and no stride padding.
pub fn qoi_encode(pixels: &[u8], desc: &QoiDescriptor) -> Result<Vec<u8>, EncodeError> {
    if desc.width == 0 || desc.height == 0 {
        return Err(EncodeError::EmptyImage);
    }
    if desc.height >= QOI_PIXELS_MAX / desc.width {
        return Err(EncodeError::PixelCountOverflow);
    }
    let channels = desc.channels.count();
    if pixels.len() != desc.width * desc.height * channels {
        return Err(EncodeError::RasterSizeMismatch);
    }

    let max_size = desc.width * desc.height * (channels + 1)
        + header::QOI_HEADER_SIZE
        + header::QOI_PADDING_SIZE;
    let mut bytes = Vec::with_capacity(max_size);
    let mut out = ByteWriter::new(&mut bytes);
    header::write_header(&mut out, desc);

    let mut previous = Pixel::initial();
    let mut pixel = Pixel::initial();
    let mut table = SeenTable::new();
    let mut run: u8 = 0;

    let total = pixels.len() / channels;
    for (i, chunk) in pixels.chunks_exact(channels).enumerate() {
        previous = pixel;
        pixel = match desc.channels {
            ChannelMode::Rgba => Pixel::new(chunk[0], chunk[1], chunk[2], chunk[3]),
            ChannelMode::Rgb => Pixel::new(chunk[0], chunk[1], chunk[2], previous.a),
        };

        if pixel == previous {
            run += 1;
            if run == 62 || i == total - 1 {
                out.write_u8(QOI_OP_RUN | (run - 1));
                run = 0;
            }
            continue;
        }

        if run > 0 {
            out.write_u8(QOI_OP_RUN | (run - 1));
            run = 0;
        }

        let index_pos = pixel.hash();
        if table.get(index_pos) == pixel {
            out.write_u8(QOI_OP_INDEX | index_pos as u8);
            continue;
        }
        table.set(index_pos, pixel);

        if pixel.a != previous.a {
            out.write_u8(QOI_OP_RGBA);
            out.write_bytes(&[pixel.r, pixel.g, pixel.b, pixel.a]);
            continue;
        }

        let dr = pixel.r.wrapping_sub(previous.r) as i8;
        let dg = pixel.g.wrapping_sub(previous.g) as i8;
        let db = pixel.b.wrapping_sub(previous.b) as i8;

        let dr_dg = dr.wrapping_sub(dg);
        let db_dg = db.wrapping_sub(dg);

        if (-2..=1).contains(&dr) && (-2..=1).contains(&dg) && (-2..=1).contains(&db) {
            out.write_u8(
                QOI_OP_DIFF | ((dr + 2) as u8) << 4 | ((dg + 2) as u8) << 2 | ((db + 2) as u8),
            );
        } else if (-32..=31).contains(&dg) && (-8..=7).contains(&dr_dg) && (-8..=7).contains(&db_dg)
        {
            out.write_u8(QOI_OP_LUMA | (dg + 32) as u8);
            out.write_u8(((dr_dg + 8) as u8) << 4 | (db_dg + 8) as u8);
        } else {
            out.write_u8(QOI_OP_RGB);
            out.write_bytes(&[pixel.r, pixel.g, pixel.b]);
        }
    }

    header::write_end_marker(&mut out);
    Ok(bytes)
}
