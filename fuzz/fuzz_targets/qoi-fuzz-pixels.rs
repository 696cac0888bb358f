#![no_main]
use libfuzzer_sys::fuzz_target;
use qoi::{ChannelMode, Colorspace, QoiDescriptor};
use std::io::Cursor;

fuzz_target!(|pixels: &[u8]| {
    if pixels.len() % 3 != 0 || pixels.len() < 3 {
        return;
    }
    let desc = QoiDescriptor {
        width: pixels.len() / 3,
        height: 1,
        channels: ChannelMode::Rgb,
        colorspace: Colorspace::Linear,
    };
    let bytes = qoi::qoi_encode(pixels, &desc).unwrap();
    let (decoded, _desc) = qoi::qoi_decode(Cursor::new(bytes), None).unwrap();
    assert_eq!(decoded, pixels);
});
