use alloc::string::String;

const FOOTER_SIZE: usize = 26;
const EXTENSION_AREA_SIZE: usize = 495;
const SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";

/// Extended metadata from the optional 495-byte extension area.
///
/// All string fields are decoded as Latin-1 (ISO-8859-1), truncated at the first NUL byte: a
/// defined, portable, lossless mapping for every byte value, in place of decoding with the
/// process's local 8-bit encoding.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ExtensionArea {
    pub author: String,
    pub comment: String,
    pub stamp_month: u16,
    pub stamp_day: u16,
    pub stamp_year: u16,
    pub stamp_hour: u16,
    pub stamp_minute: u16,
    pub stamp_second: u16,
    pub job: String,
    pub job_hour: u16,
    pub job_minute: u16,
    pub job_second: u16,
    pub software: String,
    pub version_number: u16,
    pub version_letter: u8,
    pub key_color: u32,
    pub pixel_aspect_numerator: u16,
    pub pixel_aspect_denominator: u16,
    pub gamma_numerator: u16,
    pub gamma_denominator: u16,
    pub color_correction_offset: u32,
    pub postage_stamp_offset: u32,
    pub scan_line_offset: u32,
    pub attribute_type: u8,
}

fn le_u16_at(buffer: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buffer[offset], buffer[offset + 1]])
}

fn le_u32_at(buffer: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buffer[offset],
        buffer[offset + 1],
        buffer[offset + 2],
        buffer[offset + 3],
    ])
}

/// Decodes a fixed-width, NUL-terminated Latin-1 field.
fn latin1_field(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    bytes[..end].iter().map(|&b| b as char).collect()
}

/// Attempts to locate and parse the extension area.
///
/// Returns `None` if any footer or extension-area probe fails: the footer doesn't
/// fit past the pixel payload, the signature doesn't match, `ext_offset` is out of range, the
/// extension area doesn't fit in the buffer, or the area's own `size` field is too small.
pub fn read_extension_area(buffer: &[u8], pix_data_offset: usize) -> Option<ExtensionArea> {
    let footer_offset = buffer.len().checked_sub(FOOTER_SIZE)?;
    // Strict inequality: a footer exactly abutting the pixel data is rejected.
    if footer_offset <= pix_data_offset {
        return None;
    }

    let signature = &buffer[footer_offset + 8..footer_offset + FOOTER_SIZE];
    if signature != SIGNATURE {
        return None;
    }

    let ext_offset = le_u32_at(buffer, footer_offset) as usize;
    if ext_offset < pix_data_offset || ext_offset > buffer.len() {
        return None;
    }
    if buffer.len() - ext_offset < EXTENSION_AREA_SIZE {
        return None;
    }

    let area = &buffer[ext_offset..ext_offset + EXTENSION_AREA_SIZE];
    let size = le_u16_at(area, 0) as usize;
    if size < EXTENSION_AREA_SIZE {
        return None;
    }

    Some(ExtensionArea {
        author: latin1_field(&area[2..43]),
        comment: latin1_field(&area[43..367]),
        stamp_month: le_u16_at(area, 367),
        stamp_day: le_u16_at(area, 369),
        stamp_year: le_u16_at(area, 371),
        stamp_hour: le_u16_at(area, 373),
        stamp_minute: le_u16_at(area, 375),
        stamp_second: le_u16_at(area, 377),
        job: latin1_field(&area[379..420]),
        job_hour: le_u16_at(area, 420),
        job_minute: le_u16_at(area, 422),
        job_second: le_u16_at(area, 424),
        software: latin1_field(&area[426..467]),
        version_number: le_u16_at(area, 467),
        version_letter: area[469],
        key_color: le_u32_at(area, 470),
        pixel_aspect_numerator: le_u16_at(area, 474),
        pixel_aspect_denominator: le_u16_at(area, 476),
        gamma_numerator: le_u16_at(area, 478),
        gamma_denominator: le_u16_at(area, 480),
        color_correction_offset: le_u32_at(area, 482),
        postage_stamp_offset: le_u32_at(area, 486),
        scan_line_offset: le_u32_at(area, 490),
        attribute_type: area[494],
    })
}
