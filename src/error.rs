//! Typed failure modes for [`crate::encode::qoi_encode`] and
//! [`crate::decode::qoi_decode`].
//!
//! The codec never retries or partially commits: any error aborts the
//! current encode/decode and is surfaced to the caller as-is.

use thiserror::Error;

/// Failures that can occur while encoding a raw raster into QOI bytes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The raw pixel buffer's length doesn't match `width * height * channels`.
    #[error("raster length does not match width * height * channels")]
    RasterSizeMismatch,

    /// `width` or `height` is zero.
    #[error("image has zero width or height")]
    EmptyImage,

    /// `width * height` exceeds what the format can address safely.
    #[error("image exceeds the maximum safe pixel count")]
    PixelCountOverflow,
}

/// Failures that can occur while decoding a QOI byte stream.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Header magic bytes were not `b"qoif"`.
    #[error("header magic does not match 'qoif'")]
    BadMagic,

    /// Header channels byte was not `3` or `4`.
    #[error("header channels byte must be 3 or 4, got {0}")]
    BadChannels(u8),

    /// Header colorspace byte was not `0` or `1`.
    #[error("header colorspace byte must be 0 or 1, got {0}")]
    BadColorspace(u8),

    /// `width` or `height` in the header is zero.
    #[error("image has zero width or height")]
    EmptyImage,

    /// `width * height` exceeds what the format can address safely.
    #[error("image exceeds the maximum safe pixel count")]
    PixelCountOverflow,

    /// The chunk stream ended before all pixels were produced.
    #[error("chunk stream truncated before all pixels were decoded")]
    Truncated,

    /// A `QOI_OP_LUMA` tag's second byte was required but could not be read.
    #[error("luma chunk is missing its second byte")]
    Overflow,

    /// Underlying I/O error while reading the chunk stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
