use crate::color_map::{Bgra8888, Palette};
use crate::error::TgaError;
use crate::geometry::Geometry;
use crate::header::{Bpp, ImageType};

const OPAQUE_BLACK: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];

/// Fills `raster` with opaque-black pixels, the pre-decode state every decoder variant starts
/// from and the value any pixel left undecoded by a truncation abort keeps.
pub fn prefill(raster: &mut [u8]) {
    for chunk in raster.chunks_exact_mut(4) {
        chunk.copy_from_slice(&OPAQUE_BLACK);
    }
}

fn expand5(c: u8) -> u8 {
    (c << 3) | (c >> 2)
}

/// Decodes a little-endian 15-bit truecolor sample (5 bits per channel, top bit unused).
fn bgra_from_15(w: u16) -> Bgra8888 {
    Bgra8888 {
        b: expand5((w & 0x1F) as u8),
        g: expand5(((w >> 5) & 0x1F) as u8),
        r: expand5(((w >> 10) & 0x1F) as u8),
        a: 0xFF,
    }
}

/// Decodes a little-endian 16-bit truecolor sample: same 5-bit-per-channel layout as
/// [`bgra_from_15`], with the top bit reinterpreted as a transparency flag.
fn bgra_from_16(w: u16) -> Bgra8888 {
    let mut color = bgra_from_15(w);
    color.a = if w & 0x8000 != 0 { 0x00 } else { 0xFF };
    color
}

fn bgra_from_24(src: &[u8]) -> Bgra8888 {
    Bgra8888 {
        b: src[0],
        g: src[1],
        r: src[2],
        a: 0xFF,
    }
}

fn bgra_from_32(src: &[u8]) -> Bgra8888 {
    Bgra8888 {
        b: src[0],
        g: src[1],
        r: src[2],
        a: src[3],
    }
}

fn gray_to_bgra(g: u8) -> Bgra8888 {
    Bgra8888 {
        b: g,
        g,
        r: g,
        a: 0xFF,
    }
}

/// Decodes exactly `total_pixels` pixels of `stride` bytes each from `input`, using
/// `pixel_of` to translate each raw pixel to BGRA.
///
/// If `input` runs out early, decodes as many whole pixels as it can (rounded down to a `stride`
/// boundary) and leaves the rest of `raster` at its pre-filled value.
fn decode_uncompressed(
    input: &[u8],
    total_pixels: usize,
    stride: usize,
    raster: &mut [u8],
    pixel_of: impl Fn(&[u8]) -> Bgra8888,
) -> Result<(), TgaError> {
    let available = (input.len() / stride).min(total_pixels);

    for i in 0..available {
        let src = &input[i * stride..i * stride + stride];
        pixel_of(src).write_to(&mut raster[i * 4..i * 4 + 4]);
    }

    if available < total_pixels {
        Err(TgaError::TruncDataAbort)
    } else {
        Ok(())
    }
}

/// Decodes an RLE packet stream into exactly `total_pixels` BGRA pixels.
///
/// Implements the packet-loop invariants uniformly for every RLE-carrying image
/// type: a 1-byte packet header (high bit = run vs. literal, low 7 bits = count-1), bounds
/// checked at every packet boundary, looping until exactly `total_pixels` have been produced.
fn decode_rle(
    mut input: &[u8],
    total_pixels: usize,
    stride: usize,
    raster: &mut [u8],
    pixel_of: impl Fn(&[u8]) -> Bgra8888,
) -> Result<(), TgaError> {
    let mut decoded = 0usize;

    while decoded < total_pixels {
        let (&header_byte, rest) = input.split_first().ok_or(TgaError::TruncDataAbort)?;
        input = rest;

        let count = (header_byte & 0x7F) as usize + 1;
        if decoded + count > total_pixels {
            return Err(TgaError::TooMuchPixAbort);
        }

        if header_byte & 0x80 != 0 {
            if input.len() < stride {
                return Err(TgaError::TruncDataAbort);
            }
            let color = pixel_of(&input[..stride]);
            input = &input[stride..];

            for _ in 0..count {
                color.write_to(&mut raster[decoded * 4..decoded * 4 + 4]);
                decoded += 1;
            }
        } else {
            let needed = count * stride;
            if input.len() < needed {
                return Err(TgaError::TruncDataAbort);
            }

            for i in 0..count {
                let src = &input[i * stride..i * stride + stride];
                pixel_of(src).write_to(&mut raster[decoded * 4..decoded * 4 + 4]);
                decoded += 1;
            }
            input = &input[needed..];
        }
    }

    Ok(())
}

fn le16(src: &[u8]) -> u16 {
    u16::from_le_bytes([src[0], src[1]])
}

/// Translates the pixel payload at `geom.pix_data_offset` in `file` into `raster`, a freshly
/// allocated and pre-filled `geom.total_bytes`-byte buffer.
///
/// Dispatches on `(geom.img_type, geom.pix_depth)` to one of the twelve decoder variants.
/// `palette` must be `Some` for [`ImageType::ColorMapped`]/[`ImageType::RleColorMapped`] images
/// and is ignored otherwise.
pub fn decode(
    file: &[u8],
    geom: &Geometry,
    palette: Option<&Palette>,
    raster: &mut [u8],
) -> Result<(), TgaError> {
    let input = &file[geom.pix_data_offset..];
    let total_pixels = geom.total_pixels;

    match (geom.img_type, geom.pix_depth) {
        (ImageType::ColorMapped, Bpp::Bits8) => {
            let palette = palette.expect("color-mapped image requires a palette");
            decode_uncompressed(input, total_pixels, 1, raster, |src| {
                palette.get(src[0])
            })
        }
        (ImageType::RleColorMapped, Bpp::Bits8) => {
            let palette = palette.expect("color-mapped image requires a palette");
            decode_rle(input, total_pixels, 1, raster, |src| palette.get(src[0]))
        }
        (ImageType::Grayscale, Bpp::Bits8) => {
            decode_uncompressed(input, total_pixels, 1, raster, |src| gray_to_bgra(src[0]))
        }
        (ImageType::RleGrayscale, Bpp::Bits8) => {
            decode_rle(input, total_pixels, 1, raster, |src| gray_to_bgra(src[0]))
        }
        (ImageType::TrueColor, Bpp::Bits15) => {
            decode_uncompressed(input, total_pixels, 2, raster, |src| bgra_from_15(le16(src)))
        }
        (ImageType::RleTrueColor, Bpp::Bits15) => {
            decode_rle(input, total_pixels, 2, raster, |src| bgra_from_15(le16(src)))
        }
        (ImageType::TrueColor, Bpp::Bits16) => {
            decode_uncompressed(input, total_pixels, 2, raster, |src| bgra_from_16(le16(src)))
        }
        (ImageType::RleTrueColor, Bpp::Bits16) => {
            decode_rle(input, total_pixels, 2, raster, |src| bgra_from_16(le16(src)))
        }
        (ImageType::TrueColor, Bpp::Bits24) => {
            decode_uncompressed(input, total_pixels, 3, raster, bgra_from_24)
        }
        (ImageType::RleTrueColor, Bpp::Bits24) => {
            decode_rle(input, total_pixels, 3, raster, bgra_from_24)
        }
        (ImageType::TrueColor, Bpp::Bits32) => {
            decode_uncompressed(input, total_pixels, 4, raster, bgra_from_32)
        }
        (ImageType::RleTrueColor, Bpp::Bits32) => {
            decode_rle(input, total_pixels, 4, raster, bgra_from_32)
        }
        // Every other (img_type, pix_depth) pairing is rejected by `validate` before `decode`
        // is ever reached.
        _ => unreachable!("validate() rejects every (img_type, pix_depth) pairing not handled above"),
    }
}
