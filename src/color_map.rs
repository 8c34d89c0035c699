use crate::header::Bpp;

/// A single BGRA8888 color-map entry.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Bgra8888 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Bgra8888 {
    const OPAQUE_BLACK: Self = Self {
        b: 0,
        g: 0,
        r: 0,
        a: 0xFF,
    };

    /// Writes this color as four bytes, B G R A, to `dst`.
    pub fn write_to(self, dst: &mut [u8]) {
        dst[0] = self.b;
        dst[1] = self.g;
        dst[2] = self.r;
        dst[3] = self.a;
    }
}

/// A 256-entry BGRA palette materialized from the on-disk color map.
///
/// Entries beyond the on-disk `cmap_len` are zero-extended (opaque black), matching the
/// allocate-256-then-fill-`cmap_len` behavior of the format this decoder implements.
pub struct Palette([Bgra8888; 256]);

impl Palette {
    /// Builds a palette from `cmap_bytes`, the raw on-disk color-map bytes (already sliced to
    /// exactly `cmap_len * cmap_depth.bytes()` bytes by the caller, zero-length if the image has
    /// no color map at all).
    ///
    /// Built unconditionally for every color-mapped image type, even when the header declares no
    /// color map (`cmap_type == 0`): the non-RLE color-mapped decoder indexes this palette
    /// regardless, so a color-mapped image with no on-disk palette decodes to solid opaque black
    /// rather than failing. `cmap_depth` of `None`, [`Bpp::Bits15`], or [`Bpp::Bits16`] has no
    /// case here and leaves every entry at the opaque-black default.
    pub fn build(cmap_bytes: &[u8], cmap_len: u16, cmap_depth: Option<Bpp>) -> Self {
        let mut entries = [Bgra8888::OPAQUE_BLACK; 256];

        match cmap_depth {
            Some(Bpp::Bits24) => {
                for (i, chunk) in cmap_bytes.chunks_exact(3).take(cmap_len as usize).enumerate() {
                    entries[i] = Bgra8888 {
                        b: chunk[0],
                        g: chunk[1],
                        r: chunk[2],
                        a: 0xFF,
                    };
                }
            }
            Some(Bpp::Bits32) => {
                for (i, chunk) in cmap_bytes.chunks_exact(4).take(cmap_len as usize).enumerate() {
                    entries[i] = Bgra8888 {
                        b: chunk[0],
                        g: chunk[1],
                        r: chunk[2],
                        a: chunk[3],
                    };
                }
            }
            Some(Bpp::Bits15) | Some(Bpp::Bits16) | Some(Bpp::Bits8) | None => {
                // Not exercised: a 15/16-bit color map (or no color map at all) only reaches
                // this builder through the non-RLE color-mapped type, which doesn't constrain
                // color-map depth this tightly.
            }
        }

        Self(entries)
    }

    /// Looks up the palette entry for `index`.
    pub fn get(&self, index: u8) -> Bgra8888 {
        self.0[index as usize]
    }
}
