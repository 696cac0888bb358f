//! # QOI encoder and decoder
//!
//! This crate implements an encoder and decoder for the QOI ("Quite OK
//! Image") format, a lossless raster codec built around a shared per-pixel
//! state machine: a 64-entry recently-seen-pixel table and a one-pixel
//! history register, mutated identically by [`qoi_encode`] and [`qoi_decode`]
//! so that `qoi_decode(qoi_encode(pixels)) == pixels`.
//!
//! ## Decode an image
//!
//! [`qoi_decode`] takes `impl Read` providing the bytes of a `.qoi` file and
//! an optional [`ChannelMode`] override. It returns a flat `Vec<u8>` of RGB
//! or RGBA pixels plus a [`QoiDescriptor`] describing the image, or a
//! [`DecodeError`]. Wrap the source in a `BufReader` for better throughput.
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use qoi::*;
//!
//! let file = File::open("wikipedia_008.qoi").unwrap();
//! let reader = BufReader::new(file);
//! let (pixels, desc) = qoi_decode(reader, None).unwrap();
//! ```
//!
//! ## Encode an image
//!
//! [`qoi_encode`] takes a flat `&[u8]` of RGB or RGBA pixel values and a
//! [`QoiDescriptor`]. The pixel count (`width * height`) must stay under
//! the format's safe addressing limit or encoding fails.
//!
//! ```
//! use std::fs::File;
//! use std::io::Write;
//! use qoi::*;
//!
//! let pixels = [255, 0, 0, 15, 1, 255, 255, 255, 191, 255, 0, 0, 15, 1, 74];
//! let desc = QoiDescriptor {
//!     width: pixels.len() / 3,
//!     height: 1,
//!     channels: ChannelMode::Rgb,
//!     colorspace: Colorspace::Linear,
//! };
//! let bytes = qoi_encode(&pixels, &desc).unwrap();
//! ```

mod cursor;
mod decode;
mod encode;
mod error;
mod header;
mod pixel;
mod table;

pub use decode::qoi_decode;
pub use encode::qoi_encode;
pub use error::{DecodeError, EncodeError};
pub use header::{ChannelMode, Colorspace, QoiDescriptor};
pub use pixel::Pixel;

/// 2GB is the max file size this implementation can safely handle. We guard
/// against anything larger than that, assuming the worst case of 5 bytes per
/// pixel, rounded down to a clean value. 400 million pixels ought to be
/// enough for anybody.
pub(crate) const QOI_PIXELS_MAX: usize = 400_000_000;
