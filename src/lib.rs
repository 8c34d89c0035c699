//! A small, no-std TGA (Truevision Graphics Adapter) raster decoder.
//!
//! Given a byte buffer holding a complete TGA file, [`Decoder`] validates the header, decodes the
//! pixel payload into a canonical 32-bit-per-pixel little-endian BGRA raster, normalizes pixel
//! orientation to top-left, and optionally surfaces the extended metadata carried in the TGA
//! footer/extension area.
//!
//! There is no encoding path, no file I/O — the decoder consumes an already-resident byte buffer
//! supplied by the caller — and no concurrency: a [`Decoder`] is a single-threaded finite-state
//! object driven through [`init`](Decoder::init), [`validate_header`](Decoder::validate_header),
//! [`decode`](Decoder::decode), and optionally [`flip`](Decoder::flip).
//!
//! # Examples
//!
//! ```rust
//! use tgadec::Decoder;
//!
//! // A minimal 2x2 truecolor-24 image, top-left origin.
//! let mut file = vec![0u8; 18];
//! file[2] = 2; // img_type: truecolor
//! file[12..14].copy_from_slice(&2u16.to_le_bytes()); // width
//! file[14..16].copy_from_slice(&2u16.to_le_bytes()); // height
//! file[16] = 24; // pix_depth
//! file[17] = 0x20; // top-left origin
//! file.extend_from_slice(&[
//!     0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00,
//!     0xFF, 0x00, 0x00, 0xFF, 0xFF, 0xFF,
//! ]);
//!
//! let mut decoder = Decoder::new();
//! decoder.init(&file);
//! decoder.validate_header(8192, 16384).unwrap();
//! decoder.decode().unwrap();
//! assert_eq!(decoder.data(), Some(&[
//!     0x00, 0x00, 0xFF, 0xFF, 0x00, 0xFF, 0x00, 0xFF,
//!     0xFF, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
//! ][..]));
//! ```
//!
//! [`ImageOrigin`]: enum.ImageOrigin.html

#![no_std]
#![deny(missing_debug_implementations)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unsafe_code)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(unused_qualifications)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod color_map;
mod decode;
mod error;
mod flip;
mod footer;
mod geometry;
mod header;

use alloc::string::String;
use alloc::vec::Vec;

pub use crate::color_map::Bgra8888;
pub use crate::error::{TgaError, SUCCESS_MESSAGE, VALID_HEADER_MESSAGE};
pub use crate::footer::ExtensionArea;
pub use crate::header::{Bpp, ImageOrigin, ImageType, TgaHeader};

use crate::color_map::Palette;
use crate::geometry::Geometry;

/// Lifecycle state of a [`Decoder`].
///
/// `init` resets the decoder to [`State::Initialized`] from any other state. Every other
/// transition is one-way, matching the precondition each operation enforces.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    /// `init` has not been called yet.
    NotInitialized,
    /// `init` has been called; no header has been validated yet.
    Initialized,
    /// `validate_header` accepted the header.
    HeaderValidated,
    /// `validate_header` rejected the header. Sticky: further `validate_header` calls keep
    /// returning this state without re-running the predicate.
    InvalidHeader,
    /// `decode` produced every pixel successfully.
    DecodedOK,
    /// `decode` produced a prefix of the pixels before running out of input.
    DecodingAbort,
    /// `decode` could not allocate the output raster.
    NotEnoughMem,
}

/// Extended geometry and metadata returned by [`Decoder::info`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Info {
    /// Image width in pixels. Zero if no header has been validated yet.
    pub width: u16,
    /// Image height in pixels. Zero if no header has been validated yet.
    pub height: u16,
    /// Origin corner of the source payload, before any [`Decoder::flip`].
    pub origin: Option<ImageOrigin>,
    /// Pixel bit depth as stored in the file (8, 15, 16, 24, or 32).
    pub pixel_depth: Option<Bpp>,
    /// Size of one scanline of the canonical raster, in bytes (`width * 4`).
    pub bytes_per_line: usize,
    /// Size of the fully decoded raster, in bytes (`width * height * 4`).
    pub total_size: usize,
    /// Image data type as stored in the file.
    pub image_type: Option<ImageType>,
    /// Image ID string (Latin-1, truncated at the first NUL).
    pub id_string: String,
    /// Extended metadata from the footer/extension area, if present and well-formed.
    pub extension: Option<ExtensionArea>,
}

/// A TGA file decoder.
///
/// `Decoder` borrows its input buffer and owns the raster it decodes into. Call [`init`] with a
/// buffer, then [`validate_header`] and [`decode`] in sequence; [`flip`] and [`info`] may follow.
/// [`detach`] hands the decoded raster to the caller, after which [`data`] returns `None`.
///
/// [`init`]: Decoder::init
/// [`validate_header`]: Decoder::validate_header
/// [`decode`]: Decoder::decode
/// [`flip`]: Decoder::flip
/// [`info`]: Decoder::info
/// [`detach`]: Decoder::detach
/// [`data`]: Decoder::data
#[derive(Debug)]
pub struct Decoder<'a> {
    state: State,
    data: Option<&'a [u8]>,
    header: Option<TgaHeader>,
    geometry: Option<Geometry>,
    raster: Option<Vec<u8>>,
}

impl<'a> Default for Decoder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Decoder<'a> {
    /// Creates a decoder in the [`State::NotInitialized`] state.
    pub fn new() -> Self {
        Self {
            state: State::NotInitialized,
            data: None,
            header: None,
            geometry: None,
            raster: None,
        }
    }

    /// Returns the current FSM state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Binds `buffer` as the input file and resets all derived state.
    ///
    /// Callable from any state; the caller must keep `buffer` alive for as long as the decoder is
    /// used afterward.
    pub fn init(&mut self, buffer: &'a [u8]) {
        log::trace!("init: {} byte buffer", buffer.len());
        self.data = Some(buffer);
        self.header = None;
        self.geometry = None;
        self.raster = None;
        self.state = State::Initialized;
    }

    /// Validates the header against the acceptance predicate and computes the
    /// derived geometry needed by [`decode`](Self::decode).
    ///
    /// `max_width`/`max_height` bound the image dimensions this decoder accepts; the conventional
    /// defaults are `8192`/`16384`.
    ///
    /// Returns `Err(TgaError::NotInitialized)` if `init` was never called, and
    /// `Err(TgaError::InvalidHeader)` both on first rejection and on every subsequent call once
    /// the header has been rejected (idempotent reject).
    pub fn validate_header(&mut self, max_width: u16, max_height: u16) -> Result<(), TgaError> {
        match self.state {
            State::NotInitialized => return Err(TgaError::NotInitialized),
            State::InvalidHeader => return Err(TgaError::InvalidHeader),
            _ => {}
        }

        let buffer = self.data.expect("Initialized implies data is bound");

        let result = (|| {
            if buffer.len() < header::HEADER_SIZE {
                return Err(TgaError::InvalidHeader);
            }
            let (_, header) = TgaHeader::parse(buffer).map_err(|_| TgaError::InvalidHeader)?;
            let geom = geometry::validate(&header, buffer.len(), max_width, max_height)?;
            Ok((header, geom))
        })();

        match result {
            Ok((header, geom)) => {
                log::debug!(
                    "validate_header: accepted {}x{} image_type={:?} pix_depth={:?}",
                    geom.width,
                    geom.height,
                    geom.img_type,
                    geom.pix_depth
                );
                self.header = Some(header);
                self.geometry = Some(geom);
                self.state = State::HeaderValidated;
                Ok(())
            }
            Err(e) => {
                log::debug!("validate_header: rejected ({})", e);
                self.state = State::InvalidHeader;
                Err(e)
            }
        }
    }

    /// Decodes the pixel payload into a freshly allocated canonical BGRA8888 raster.
    ///
    /// Requires [`State::HeaderValidated`]; returns `Err(TgaError::NeedHeaderValidation)`
    /// otherwise. On truncated or over-long RLE input, decodes as much of the raster as possible
    /// and transitions to [`State::DecodingAbort`], still returning an error — the partial raster
    /// remains available through [`data`](Self::data).
    pub fn decode(&mut self) -> Result<(), TgaError> {
        if self.state != State::HeaderValidated {
            return Err(TgaError::NeedHeaderValidation);
        }

        let buffer = self.data.expect("HeaderValidated implies data is bound");
        let geom = self
            .geometry
            .expect("HeaderValidated implies geometry is populated");

        self.raster = None;

        let mut raster = Vec::new();
        if raster.try_reserve_exact(geom.total_bytes).is_err() {
            log::debug!("decode: failed to allocate {} bytes", geom.total_bytes);
            self.state = State::NotEnoughMem;
            return Err(TgaError::MemAllocErr);
        }
        raster.resize(geom.total_bytes, 0);
        decode::prefill(&mut raster);

        // The non-RLE/RLE color-mapped decoders always index a palette, even when the header
        // declares no color map at all (see color_map::Palette::build).
        let palette = if geom.img_type.is_color_mapped() {
            let cmap_bytes = &buffer[geom.cmap_offset..geom.pix_data_offset];
            Some(Palette::build(cmap_bytes, geom.cmap_len, geom.cmap_depth))
        } else {
            None
        };

        let result = decode::decode(buffer, &geom, palette.as_ref(), &mut raster);
        self.raster = Some(raster);

        match result {
            Ok(()) => {
                log::debug!("decode: success, {} pixels", geom.total_pixels);
                self.state = State::DecodedOK;
                Ok(())
            }
            Err(e) => {
                log::debug!("decode: aborted ({})", e);
                self.state = State::DecodingAbort;
                Err(e)
            }
        }
    }

    /// Normalizes the decoded raster to top-left origin, in place.
    ///
    /// A no-op if no raster has been decoded yet (including after [`detach`](Self::detach)).
    pub fn flip(&mut self) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        let geom = self.geometry.expect("a decoded raster implies geometry");
        flip::flip(raster, geom.origin, geom.width as usize, geom.height as usize);
    }

    /// Returns the decoded raster, or `None` before a (possibly aborted) [`decode`](Self::decode)
    /// or after [`detach`](Self::detach).
    pub fn data(&self) -> Option<&[u8]> {
        self.raster.as_deref()
    }

    /// Moves the decoded raster out of the decoder.
    ///
    /// Requires [`State::DecodedOK`] or [`State::DecodingAbort`]; returns
    /// `Err(TgaError::NeedDecoding)` otherwise, or if the raster was already detached.
    pub fn detach(&mut self) -> Result<Vec<u8>, TgaError> {
        match self.state {
            State::DecodedOK | State::DecodingAbort => {
                self.raster.take().ok_or(TgaError::NeedDecoding)
            }
            _ => Err(TgaError::NeedDecoding),
        }
    }

    /// Returns the fixed English message for `err`, with no localization.
    pub fn err_str(&self, err: TgaError) -> &'static str {
        err.message()
    }

    /// Returns geometry and extended metadata for the current file.
    ///
    /// Basic geometry fields are populated once `init` has been called; `width`/`height`/etc.
    /// stay at their defaults until a header has been validated. The footer/extension-area probe
    /// additionally requires a validated header, since it needs `pix_data_offset`.
    pub fn info(&self) -> Info {
        let Some(buffer) = self.data else {
            return Info::default();
        };

        let Some(geom) = self.geometry else {
            return Info::default();
        };
        let header = self
            .header
            .expect("geometry implies header was parsed");

        let id_string = geometry::id_string(buffer, header.id_len)
            .iter()
            .map(|&b| b as char)
            .collect();

        Info {
            width: geom.width,
            height: geom.height,
            origin: Some(geom.origin),
            pixel_depth: Some(geom.pix_depth),
            bytes_per_line: geom.bytes_per_line,
            total_size: geom.total_bytes,
            image_type: Some(geom.img_type),
            id_string,
            extension: footer::read_extension_area(buffer, geom.pix_data_offset),
        }
    }
}
