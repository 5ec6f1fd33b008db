//! Fixture images for unit tests.
//!
//! Images are encoded with the `image` crate. EXIF data is injected as a
//! hand-built little-endian TIFF structure inside a JPEG APP1 segment, so tests
//! control exactly which tags are present.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

const TAG_MAKE: u16 = 0x010F;
const TAG_MODEL: u16 = 0x0110;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_EXPOSURE_TIME: u16 = 0x829A;
const TAG_F_NUMBER: u16 = 0x829D;
const TAG_ISO: u16 = 0x8827;

/// Tags to embed in a fixture JPEG.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExifFixture {
    pub make: Option<&'static str>,
    pub model: Option<&'static str>,
    pub exposure_time: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
    pub iso: Option<u16>,
}

impl ExifFixture {
    /// Canon EOS, 1/200s, f/4, ISO 400.
    pub fn canon_eos() -> Self {
        Self {
            make: Some("Canon"),
            model: Some("EOS"),
            exposure_time: Some((1, 200)),
            f_number: Some((4, 1)),
            iso: Some(400),
        }
    }
}

/// Encode a blank image of the given size.
pub(crate) fn encode_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = match format {
        ImageFormat::Gif => DynamicImage::new_rgba8(width, height),
        _ => DynamicImage::new_rgb8(width, height),
    };
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
    buffer
}

pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, ImageFormat::Png)
}

pub(crate) fn gif(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, ImageFormat::Gif)
}

/// JPEG with an EXIF APP1 segment directly after SOI.
pub(crate) fn jpeg_with_exif(width: u32, height: u32, fixture: &ExifFixture) -> Vec<u8> {
    let jpeg = encode_image(width, height, ImageFormat::Jpeg);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend(build_tiff(fixture));
    let segment_len = (payload.len() + 2) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend(payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

struct Entry {
    tag: u16,
    kind: u16,
    count: u32,
    data: Vec<u8>,
}

fn ascii(tag: u16, text: &str) -> Entry {
    let mut data = text.as_bytes().to_vec();
    data.push(0);
    Entry {
        tag,
        kind: TYPE_ASCII,
        count: data.len() as u32,
        data,
    }
}

fn rational(tag: u16, (num, denom): (u32, u32)) -> Entry {
    let mut data = num.to_le_bytes().to_vec();
    data.extend(denom.to_le_bytes());
    Entry {
        tag,
        kind: TYPE_RATIONAL,
        count: 1,
        data,
    }
}

fn short(tag: u16, value: u16) -> Entry {
    Entry {
        tag,
        kind: TYPE_SHORT,
        count: 1,
        data: value.to_le_bytes().to_vec(),
    }
}

fn long(tag: u16, value: u32) -> Entry {
    Entry {
        tag,
        kind: TYPE_LONG,
        count: 1,
        data: value.to_le_bytes().to_vec(),
    }
}

/// Serialize one IFD starting at `start` (offset from the TIFF header).
/// Values longer than four bytes go to a data area right after the IFD.
fn write_ifd(entries: &[Entry], start: u32) -> Vec<u8> {
    let data_start = start + 2 + 12 * entries.len() as u32 + 4;
    let mut head = (entries.len() as u16).to_le_bytes().to_vec();
    let mut data: Vec<u8> = Vec::new();

    for entry in entries {
        head.extend(entry.tag.to_le_bytes());
        head.extend(entry.kind.to_le_bytes());
        head.extend(entry.count.to_le_bytes());
        if entry.data.len() <= 4 {
            let mut inline = entry.data.clone();
            inline.resize(4, 0);
            head.extend(inline);
        } else {
            head.extend((data_start + data.len() as u32).to_le_bytes());
            data.extend(&entry.data);
        }
    }

    head.extend(0u32.to_le_bytes());
    head.extend(data);
    head
}

fn build_tiff(fixture: &ExifFixture) -> Vec<u8> {
    let mut exif_entries = Vec::new();
    if let Some(v) = fixture.exposure_time {
        exif_entries.push(rational(TAG_EXPOSURE_TIME, v));
    }
    if let Some(v) = fixture.f_number {
        exif_entries.push(rational(TAG_F_NUMBER, v));
    }
    if let Some(v) = fixture.iso {
        exif_entries.push(short(TAG_ISO, v));
    }

    let mut ifd0 = Vec::new();
    if let Some(make) = fixture.make {
        ifd0.push(ascii(TAG_MAKE, make));
    }
    if let Some(model) = fixture.model {
        ifd0.push(ascii(TAG_MODEL, model));
    }

    let has_exif_ifd = !exif_entries.is_empty();
    if has_exif_ifd {
        ifd0.push(long(TAG_EXIF_IFD, 0));
    }

    // The pointer is inline, so the IFD0 length does not depend on its value.
    let ifd0_len = write_ifd(&ifd0, 8).len() as u32;
    if has_exif_ifd {
        if let Some(pointer) = ifd0.last_mut() {
            pointer.data = (8 + ifd0_len).to_le_bytes().to_vec();
        }
    }

    let mut tiff = b"II*\0".to_vec();
    tiff.extend(8u32.to_le_bytes());
    tiff.extend(write_ifd(&ifd0, 8));
    if has_exif_ifd {
        tiff.extend(write_ifd(&exif_entries, 8 + ifd0_len));
    }
    tiff
}
