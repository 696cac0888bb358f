//! The 14-byte QOI preamble and the 8-byte end marker.

use std::fmt::{self, Display};

use crate::cursor::{ByteReader, ByteWriter};
use crate::error::DecodeError;

use std::io::Read;

/// Big-endian ASCII "qoif".
pub const QOI_MAGIC: u32 = 0x716F_6966;

/// Size in bytes of the fixed header.
pub const QOI_HEADER_SIZE: usize = 14;

/// Size in bytes of the trailing end marker.
pub const QOI_PADDING_SIZE: usize = 8;

/// Seven zero bytes followed by one byte of value `1`.
pub const QOI_PADDING: [u8; QOI_PADDING_SIZE] = [0, 0, 0, 0, 0, 0, 0, 1];

/// Channel count declared by a stream. A 3-channel stream never carries
/// alpha information past the initial register value of 255.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChannelMode {
    Rgb = 3,
    Rgba = 4,
}

impl ChannelMode {
    #[inline]
    pub const fn count(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, ChannelMode::Rgba)
    }
}

impl TryFrom<u8> for ChannelMode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(ChannelMode::Rgb),
            4 => Ok(ChannelMode::Rgba),
            other => Err(DecodeError::BadChannels(other)),
        }
    }
}

impl Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChannelMode::Rgb => "RGB",
            ChannelMode::Rgba => "RGBA",
        })
    }
}

/// Opaque colorspace marker. Preserved verbatim, never interpreted by the
/// codec itself. `0` means sRGB with linear alpha, `1` means all channels
/// linear — the spec's sense, not the inverted one some reference sources use.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Colorspace {
    Srgb = 0,
    Linear = 1,
}

impl TryFrom<u8> for Colorspace {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Colorspace::Srgb),
            1 => Ok(Colorspace::Linear),
            other => Err(DecodeError::BadColorspace(other)),
        }
    }
}

impl Display for Colorspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Colorspace::Srgb => "sRGB",
            Colorspace::Linear => "Linear",
        })
    }
}

/// Describes an image: dimensions, channel layout, colorspace.
///
/// Produced by [`crate::decode::qoi_decode`] and required as input to
/// [`crate::encode::qoi_encode`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QoiDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: ChannelMode,
    pub colorspace: Colorspace,
}

impl QoiDescriptor {
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

pub(crate) fn write_header(out: &mut ByteWriter<'_>, desc: &QoiDescriptor) {
    out.write_u32_be(QOI_MAGIC);
    out.write_u32_be(desc.width as u32);
    out.write_u32_be(desc.height as u32);
    out.write_u8(desc.channels as u8);
    out.write_u8(desc.colorspace as u8);
}

pub(crate) fn write_end_marker(out: &mut ByteWriter<'_>) {
    out.write_bytes(&QOI_PADDING);
}

/// Channel override for decode: when `Some`, the header's own channels byte
/// is still consumed (to stay in lockstep with the byte stream) but the
/// caller's choice determines the output buffer's layout.
pub(crate) fn read_header<R: Read>(
    reader: &mut ByteReader<R>,
    channels_override: Option<ChannelMode>,
) -> Result<QoiDescriptor, DecodeError> {
    let magic = reader.read_u32_be().map_err(map_header_io)?;
    if magic != QOI_MAGIC {
        return Err(DecodeError::BadMagic);
    }

    let width = reader.read_u32_be().map_err(map_header_io)? as usize;
    let height = reader.read_u32_be().map_err(map_header_io)? as usize;

    let channels_byte = reader.read_u8().map_err(map_header_io)?;
    let colorspace_byte = reader.read_u8().map_err(map_header_io)?;

    let channels = match channels_override {
        Some(channels) => {
            // Still validate the stream's own byte even though we override it.
            ChannelMode::try_from(channels_byte)?;
            channels
        }
        None => ChannelMode::try_from(channels_byte)?,
    };
    let colorspace = Colorspace::try_from(colorspace_byte)?;

    Ok(QoiDescriptor {
        width,
        height,
        channels,
        colorspace,
    })
}

fn map_header_io(err: std::io::Error) -> DecodeError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        DecodeError::Truncated
    } else {
        DecodeError::Io(err)
    }
}
