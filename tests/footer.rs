mod common;

use common::*;
use tgadec::Decoder;

const SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";

/// Builds a complete 495-byte extension area, every string field left empty and every numeric
/// field zero except where overridden by the caller.
fn extension_area(author: &str) -> Vec<u8> {
    let mut area = vec![0u8; 495];
    area[0..2].copy_from_slice(&495u16.to_le_bytes());
    let bytes = author.as_bytes();
    area[2..2 + bytes.len()].copy_from_slice(bytes);
    area
}

fn footer(ext_offset: u32) -> Vec<u8> {
    let mut f = Vec::with_capacity(26);
    f.extend_from_slice(&ext_offset.to_le_bytes());
    f.extend_from_slice(&0u32.to_le_bytes()); // dev_area_offset, unused
    f.extend_from_slice(SIGNATURE);
    f
}

#[test]
fn extension_area_round_trips_through_info() {
    let payload = [0x00, 0x00, 0xFF];
    let mut data = file(2, 1, 1, 24, 0x20, &payload);
    let pix_data_offset = data.len() - payload.len();
    let ext_offset = data.len() as u32;
    data.extend_from_slice(&extension_area("artist"));
    data.extend_from_slice(&footer(ext_offset));

    let mut decoder = Decoder::new();
    decoder.init(&data);
    decoder.validate_header(8192, 16384).unwrap();
    decoder.decode().unwrap();

    let info = decoder.info();
    let extension = info.extension.expect("well-formed extension area should parse");
    assert_eq!(extension.author, "artist");
    let _ = pix_data_offset;
}

#[test]
fn footer_abutting_pixel_data_is_rejected() {
    // ext_offset == pix_data_offset, no strict gap: rejected per the strict-inequality rule.
    let payload = [0x00, 0x00, 0xFF];
    let mut data = file(2, 1, 1, 24, 0x20, &payload);
    let pix_data_offset = data.len();
    data.extend_from_slice(&footer(pix_data_offset as u32));

    let mut decoder = Decoder::new();
    decoder.init(&data);
    decoder.validate_header(8192, 16384).unwrap();
    decoder.decode().unwrap();
    assert!(decoder.info().extension.is_none());
}

#[test]
fn signature_mismatch_is_rejected() {
    let payload = [0x00, 0x00, 0xFF];
    let mut data = file(2, 1, 1, 24, 0x20, &payload);
    let ext_offset = data.len() as u32;
    data.extend_from_slice(&extension_area("artist"));
    let mut f = footer(ext_offset);
    let sig_start = f.len() - 18;
    f[sig_start] = b'X'; // corrupt the signature
    data.extend_from_slice(&f);

    let mut decoder = Decoder::new();
    decoder.init(&data);
    decoder.validate_header(8192, 16384).unwrap();
    decoder.decode().unwrap();
    assert!(decoder.info().extension.is_none());
}

#[test]
fn no_footer_at_all_leaves_extension_none() {
    let payload = [0x00, 0x00, 0xFF];
    let data = file(2, 1, 1, 24, 0x20, &payload);
    let mut decoder = Decoder::new();
    decoder.init(&data);
    decoder.validate_header(8192, 16384).unwrap();
    decoder.decode().unwrap();
    assert!(decoder.info().extension.is_none());
}

#[test]
fn truncated_extension_area_size_field_is_rejected() {
    let payload = [0x00, 0x00, 0xFF];
    let mut data = file(2, 1, 1, 24, 0x20, &payload);
    let ext_offset = data.len() as u32;
    let mut area = extension_area("artist");
    area[0..2].copy_from_slice(&10u16.to_le_bytes()); // declares a too-small size
    data.extend_from_slice(&area);
    data.extend_from_slice(&footer(ext_offset));

    let mut decoder = Decoder::new();
    decoder.init(&data);
    decoder.validate_header(8192, 16384).unwrap();
    decoder.decode().unwrap();
    assert!(decoder.info().extension.is_none());
}
