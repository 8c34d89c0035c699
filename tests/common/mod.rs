//! Shared byte-vector builders for TGA test fixtures.
//!
//! Every scenario here is given as exact bytes, so these helpers build files
//! in-memory instead of shipping binary `.tga` fixtures.

#![allow(dead_code)]

pub const DEFAULT_MAX_WIDTH: u16 = 8192;
pub const DEFAULT_MAX_HEIGHT: u16 = 16384;

/// Builds an 18-byte TGA header with no color map.
pub fn header(img_type: u8, width: u16, height: u16, pix_depth: u8, descr: u8) -> Vec<u8> {
    header_with_cmap(img_type, width, height, pix_depth, descr, 0, 0, 0)
}

/// Builds an 18-byte TGA header with a color map.
#[allow(clippy::too_many_arguments)]
pub fn header_with_cmap(
    img_type: u8,
    width: u16,
    height: u16,
    pix_depth: u8,
    descr: u8,
    cmap_len: u16,
    cmap_depth: u8,
    id_len: u8,
) -> Vec<u8> {
    let mut h = vec![0u8; 18];
    h[0] = id_len;
    h[1] = if cmap_len > 0 { 1 } else { 0 };
    h[2] = img_type;
    h[3..5].copy_from_slice(&0u16.to_le_bytes()); // cmap_start
    h[5..7].copy_from_slice(&cmap_len.to_le_bytes());
    h[7] = cmap_depth;
    h[8..10].copy_from_slice(&0u16.to_le_bytes()); // x_offset
    h[10..12].copy_from_slice(&0u16.to_le_bytes()); // y_offset
    h[12..14].copy_from_slice(&width.to_le_bytes());
    h[14..16].copy_from_slice(&height.to_le_bytes());
    h[16] = pix_depth;
    h[17] = descr;
    h
}

/// Builds a complete file: header + payload, with no color map or id string.
pub fn file(img_type: u8, width: u16, height: u16, pix_depth: u8, descr: u8, payload: &[u8]) -> Vec<u8> {
    let mut f = header(img_type, width, height, pix_depth, descr);
    f.extend_from_slice(payload);
    f
}

/// Builds a complete file: header + palette bytes + payload.
#[allow(clippy::too_many_arguments)]
pub fn file_with_cmap(
    img_type: u8,
    width: u16,
    height: u16,
    pix_depth: u8,
    descr: u8,
    cmap_len: u16,
    cmap_depth: u8,
    cmap_bytes: &[u8],
    payload: &[u8],
) -> Vec<u8> {
    let mut f = header_with_cmap(img_type, width, height, pix_depth, descr, cmap_len, cmap_depth, 0);
    f.extend_from_slice(cmap_bytes);
    f.extend_from_slice(payload);
    f
}
