use core::fmt;

/// Fixed message returned by [`TgaError::message`] for the `ValidHeader` status.
///
/// `ValidHeader` isn't a [`TgaError`] variant (it's a success outcome of
/// [`validate_header`](crate::Decoder::validate_header)), but callers that want the
/// complete status-to-message table still need to reach this text.
pub const VALID_HEADER_MESSAGE: &str = "format is valid";

/// Fixed message for the `Success` status, the decode-side counterpart of
/// [`VALID_HEADER_MESSAGE`].
pub const SUCCESS_MESSAGE: &str = "successfully decoded";

/// Errors produced while validating a header or decoding pixel data.
///
/// Every variant maps to a fixed English message via [`TgaError::message`], matching the
/// string-per-code table of the format this decoder implements.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[non_exhaustive]
pub enum TgaError {
    /// The header failed the acceptance predicate (size, field ranges, or geometry limits).
    InvalidHeader,
    /// Pixel payload ended before every pixel could be decoded.
    TruncDataAbort,
    /// An RLE run or literal packet would have produced more pixels than the image holds.
    TooMuchPixAbort,
    /// The raster buffer could not be allocated.
    MemAllocErr,
    /// `init` was never called on this decoder.
    NotInitialized,
    /// `decode` was called before a successful `validate_header`.
    NeedHeaderValidation,
    /// `detach` was called before a successful (or aborted) `decode`.
    NeedDecoding,
}

impl TgaError {
    /// Returns the fixed English message for this error, with no localization.
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidHeader => "format is not valid",
            Self::TruncDataAbort => "truncated data during decoding",
            Self::TooMuchPixAbort => "too much pixels in data, decoding aborted",
            Self::MemAllocErr => "memory allocation error",
            Self::NotInitialized => "not initialized",
            Self::NeedHeaderValidation => "need validation before decoding",
            Self::NeedDecoding => "need to decode before data detaching",
        }
    }
}

impl fmt::Display for TgaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TgaError {}
