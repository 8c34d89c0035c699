use crate::header::{Bpp, ImageOrigin, ImageType, TgaHeader, HEADER_SIZE};
use crate::error::TgaError;

/// Geometry and byte offsets derived from a header that has passed [`validate`].
///
/// Every field here is computed once, at validation time, so the decode and flip stages never
/// need to re-derive them (and never need to re-read the header bytes).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Geometry {
    pub img_type: ImageType,
    pub pix_depth: Bpp,
    pub has_cmap: bool,
    pub cmap_depth: Option<Bpp>,
    pub cmap_len: u16,
    pub cmap_offset: usize,
    pub pix_data_offset: usize,
    pub width: u16,
    pub height: u16,
    pub total_pixels: usize,
    pub total_bytes: usize,
    pub bytes_per_line: usize,
    pub origin: ImageOrigin,
    pub alpha_bits: u8,
}

/// Applies the acceptance predicate to `header` against a buffer of `buffer_len` bytes and, if it
/// passes, computes the derived [`Geometry`].
///
/// `max_width`/`max_height` bound the image dimensions this decoder is willing to accept; pass
/// `8192`/`16384` for the conventional defaults.
pub fn validate(
    header: &TgaHeader,
    buffer_len: usize,
    max_width: u16,
    max_height: u16,
) -> Result<Geometry, TgaError> {
    // cmap_type is either "no color map" or "color map present".
    if header.cmap_type > 1 {
        return Err(TgaError::InvalidHeader);
    }
    let has_cmap = header.cmap_type == 1;

    // A present color map must use one of the four accepted entry depths.
    let cmap_depth = if has_cmap {
        let depth = header.cmap_depth().ok_or(TgaError::InvalidHeader)?;
        if matches!(depth, Bpp::Bits8) {
            return Err(TgaError::InvalidHeader);
        }
        Some(depth)
    } else {
        None
    };

    // img_type must be one of the six accepted values.
    let img_type = header.img_type().ok_or(TgaError::InvalidHeader)?;

    // pix_depth must be one of the five accepted values.
    let pix_depth = header.pix_depth().ok_or(TgaError::InvalidHeader)?;

    // Width and height must both be nonzero.
    if header.width == 0 || header.height == 0 {
        return Err(TgaError::InvalidHeader);
    }

    let alpha_bits = header.alpha_bits();

    // Truecolor images are only ever stored as 15/16/24/32-bit RGB(A) samples; there is no
    // decoder path for an 8-bit truecolor sample, so reject it here rather than let it reach
    // decode() with nowhere to go.
    if img_type.is_true_color() && matches!(pix_depth, Bpp::Bits8) {
        return Err(TgaError::InvalidHeader);
    }

    // Alpha-bit ceilings for truecolor images: none at 15 or 24 bits, at most one at 16 bits.
    if img_type.is_true_color() {
        let max_alpha = match pix_depth {
            Bpp::Bits15 => 0,
            Bpp::Bits16 => 1,
            Bpp::Bits24 => 0,
            Bpp::Bits32 | Bpp::Bits8 => u8::MAX,
        };
        if alpha_bits > max_alpha {
            return Err(TgaError::InvalidHeader);
        }
    }

    // Grayscale images are always 8 bits per pixel.
    if img_type.is_grayscale() && !matches!(pix_depth, Bpp::Bits8) {
        return Err(TgaError::InvalidHeader);
    }

    // RLE color-mapped images must declare an 8-bit palette index and a color map with 24- or
    // 32-bit entries and no more than 256 of them. Non-RLE color-mapped images aren't held to
    // this tight a standard; they only need to satisfy the general rules above plus the
    // pix-depth-must-be-8 rule below.
    if matches!(img_type, ImageType::RleColorMapped) {
        if !has_cmap || !matches!(pix_depth, Bpp::Bits8) {
            return Err(TgaError::InvalidHeader);
        }
        match cmap_depth {
            Some(Bpp::Bits24) | Some(Bpp::Bits32) => {}
            _ => return Err(TgaError::InvalidHeader),
        }
        if header.cmap_len > 256 {
            return Err(TgaError::InvalidHeader);
        }
    }

    // Both color-mapped image types decode one palette index per pixel regardless of the
    // declared pixel depth (no known TGA encoder stores color-map indices at any other width),
    // so pix_depth must be 8 for either, including the non-RLE type that the check above
    // doesn't otherwise constrain this tightly.
    if img_type.is_color_mapped() && !matches!(pix_depth, Bpp::Bits8) {
        return Err(TgaError::InvalidHeader);
    }

    let cmap_offset = HEADER_SIZE + header.id_len as usize;
    let cmap_bytes = if has_cmap {
        header.cmap_len as usize * cmap_depth.map(Bpp::bytes).unwrap_or(0) as usize
    } else {
        0
    };
    let pix_data_offset = cmap_offset + cmap_bytes;

    // The pixel payload must start at or before the end of the buffer.
    if pix_data_offset > buffer_len {
        return Err(TgaError::InvalidHeader);
    }

    // Enforce the caller-supplied dimension ceilings.
    if header.width > max_width || header.height > max_height {
        return Err(TgaError::InvalidHeader);
    }

    let total_pixels = header.width as usize * header.height as usize;
    let total_bytes = total_pixels * 4;
    let bytes_per_line = header.width as usize * 4;

    Ok(Geometry {
        img_type,
        pix_depth,
        has_cmap,
        cmap_depth,
        cmap_len: header.cmap_len,
        cmap_offset,
        pix_data_offset,
        width: header.width,
        height: header.height,
        total_pixels,
        total_bytes,
        bytes_per_line,
        origin: header.origin(),
        alpha_bits,
    })
}

/// Extracts the image ID string: the bytes at offset 18, up to `id_len` or the first NUL,
/// whichever comes first.
pub fn id_string(buffer: &[u8], id_len: u8) -> &[u8] {
    let end = (HEADER_SIZE + id_len as usize).min(buffer.len());
    let bytes = &buffer[HEADER_SIZE.min(buffer.len())..end];
    match bytes.iter().position(|&b| b == 0) {
        Some(nul) => &bytes[..nul],
        None => bytes,
    }
}
