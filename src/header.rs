use nom::{
    number::complete::{le_u16, le_u8},
    IResult,
};

/// Size in bytes of the fixed TGA header prefix.
pub const HEADER_SIZE: usize = 18;

/// Bit depth of a pixel or color-map entry.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[non_exhaustive]
pub enum Bpp {
    /// 8 bits per pixel.
    Bits8,
    /// 15 bits per pixel (the top bit of the containing 16-bit word is unused).
    Bits15,
    /// 16 bits per pixel (the top bit of the containing 16-bit word is an alpha flag).
    Bits16,
    /// 24 bits per pixel.
    Bits24,
    /// 32 bits per pixel.
    Bits32,
}

impl Bpp {
    fn new(value: u8) -> Option<Self> {
        Some(match value {
            8 => Self::Bits8,
            15 => Self::Bits15,
            16 => Self::Bits16,
            24 => Self::Bits24,
            32 => Self::Bits32,
            _ => return None,
        })
    }

    /// Returns the number of bits.
    pub fn bits(self) -> u8 {
        match self {
            Self::Bits8 => 8,
            Self::Bits15 => 15,
            Self::Bits16 => 16,
            Self::Bits24 => 24,
            Self::Bits32 => 32,
        }
    }

    /// Returns the number of bytes needed to store one value at this bit depth, rounded up.
    pub fn bytes(self) -> u8 {
        match self {
            Self::Bits8 => 1,
            Self::Bits15 | Self::Bits16 => 2,
            Self::Bits24 => 3,
            Self::Bits32 => 4,
        }
    }
}

/// Image data type, decoded from the `img_type` header byte.
///
/// Only the six values accepted by the format have a variant; any other byte is rejected by
/// [`TgaHeader::img_type`] rather than modeled here.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ImageType {
    /// Color-mapped, uncompressed (type 1).
    ColorMapped,
    /// True color, uncompressed (type 2).
    TrueColor,
    /// Grayscale, uncompressed (type 3).
    Grayscale,
    /// Color-mapped, run-length encoded (type 9).
    RleColorMapped,
    /// True color, run-length encoded (type 10).
    RleTrueColor,
    /// Grayscale, run-length encoded (type 11).
    RleGrayscale,
}

impl ImageType {
    fn new(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::ColorMapped,
            2 => Self::TrueColor,
            3 => Self::Grayscale,
            9 => Self::RleColorMapped,
            10 => Self::RleTrueColor,
            11 => Self::RleGrayscale,
            _ => return None,
        })
    }

    /// Whether the pixel payload for this type is run-length encoded.
    pub fn is_rle(self) -> bool {
        matches!(
            self,
            Self::RleColorMapped | Self::RleTrueColor | Self::RleGrayscale
        )
    }

    /// Whether this type indexes pixels through a color map.
    pub fn is_color_mapped(self) -> bool {
        matches!(self, Self::ColorMapped | Self::RleColorMapped)
    }

    /// Whether this type stores full RGB(A) samples directly in the pixel data.
    pub fn is_true_color(self) -> bool {
        matches!(self, Self::TrueColor | Self::RleTrueColor)
    }

    /// Whether this type stores a single grayscale channel.
    pub fn is_grayscale(self) -> bool {
        matches!(self, Self::Grayscale | Self::RleGrayscale)
    }
}

/// Which corner of the image the first pixel in the payload maps to.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ImageOrigin {
    /// Bottom left corner; the payload's first row is the image's bottom row.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
    /// Top left corner. This is the canonical raster orientation; no flip is required.
    TopLeft,
    /// Top right corner.
    TopRight,
    /// No header has been validated yet, so no origin is known.
    Unknown,
}

impl ImageOrigin {
    fn from_image_descriptor(value: u8) -> Self {
        match (value & 0x30) >> 4 {
            0 => Self::BottomLeft,
            1 => Self::BottomRight,
            2 => Self::TopLeft,
            _ => Self::TopRight,
        }
    }
}

/// Raw TGA header fields, decoded without validating any cross-field constraint.
///
/// See <https://www.fileformat.info/format/tga/egff.htm> for a detailed field description.
/// Use [`crate::validate::validate`] to apply the acceptance predicate and compute the derived
/// geometry needed to decode pixel data.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TgaHeader {
    /// Length, in bytes, of the image ID field immediately following the header.
    pub id_len: u8,
    /// Raw `cmap_type` byte (0 = no color map, 1 = color map present).
    pub cmap_type: u8,
    /// Raw `img_type` byte, before it is known to be one of the six accepted values.
    pub img_type_raw: u8,
    /// First color-map entry referenced by the image data.
    pub cmap_start: u16,
    /// Number of entries in the color map.
    pub cmap_len: u16,
    /// Raw color-map entry depth in bits; meaningless unless `cmap_type == 1`.
    pub cmap_depth_raw: u8,
    /// X coordinate of the image's lower-left corner; informational only.
    pub x_offset: u16,
    /// Y coordinate of the image's lower-left corner; informational only.
    pub y_offset: u16,
    /// Image width in pixels.
    pub width: u16,
    /// Image height in pixels.
    pub height: u16,
    /// Raw pixel depth byte, before it is known to be one of the five accepted values.
    pub pix_depth_raw: u8,
    /// Raw image descriptor byte (bits 5..4 origin, bits 3..0 alpha/attribute bit count).
    pub img_descr: u8,
}

impl TgaHeader {
    pub(crate) fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, id_len) = le_u8(input)?;
        let (input, cmap_type) = le_u8(input)?;
        let (input, img_type_raw) = le_u8(input)?;
        let (input, cmap_start) = le_u16(input)?;
        let (input, cmap_len) = le_u16(input)?;
        let (input, cmap_depth_raw) = le_u8(input)?;
        let (input, x_offset) = le_u16(input)?;
        let (input, y_offset) = le_u16(input)?;
        let (input, width) = le_u16(input)?;
        let (input, height) = le_u16(input)?;
        let (input, pix_depth_raw) = le_u8(input)?;
        let (input, img_descr) = le_u8(input)?;

        Ok((
            input,
            TgaHeader {
                id_len,
                cmap_type,
                img_type_raw,
                cmap_start,
                cmap_len,
                cmap_depth_raw,
                x_offset,
                y_offset,
                width,
                height,
                pix_depth_raw,
                img_descr,
            },
        ))
    }

    /// Decodes [`Self::img_type_raw`] into an [`ImageType`], if it is one of the six accepted
    /// values.
    pub fn img_type(&self) -> Option<ImageType> {
        ImageType::new(self.img_type_raw)
    }

    /// Decodes [`Self::pix_depth_raw`] into a [`Bpp`], if it is one of the five accepted values.
    pub fn pix_depth(&self) -> Option<Bpp> {
        Bpp::new(self.pix_depth_raw)
    }

    /// Decodes [`Self::cmap_depth_raw`] into a [`Bpp`], if it is one of the four accepted
    /// color-map depths. Only meaningful when [`Self::cmap_type`] is 1.
    pub fn cmap_depth(&self) -> Option<Bpp> {
        Bpp::new(self.cmap_depth_raw)
    }

    /// Origin corner encoded in bits 5..4 of the image descriptor byte.
    pub fn origin(&self) -> ImageOrigin {
        ImageOrigin::from_image_descriptor(self.img_descr)
    }

    /// Number of alpha/attribute bits encoded in bits 3..0 of the image descriptor byte.
    pub fn alpha_bits(&self) -> u8 {
        self.img_descr & 0xF
    }
}
