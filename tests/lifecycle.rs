mod common;

use common::*;
use tgadec::{Decoder, State, TgaError};

#[test]
fn fresh_decoder_is_not_initialized() {
    let decoder = Decoder::new();
    assert_eq!(decoder.state(), State::NotInitialized);
    assert_eq!(decoder.data(), None);
}

#[test]
fn not_initialized_error_message() {
    let decoder = Decoder::new();
    assert_eq!(decoder.err_str(TgaError::NotInitialized), "not initialized");
}

#[test]
fn every_error_has_a_distinct_fixed_message() {
    let decoder = Decoder::new();
    let variants = [
        TgaError::InvalidHeader,
        TgaError::TruncDataAbort,
        TgaError::TooMuchPixAbort,
        TgaError::MemAllocErr,
        TgaError::NotInitialized,
        TgaError::NeedHeaderValidation,
        TgaError::NeedDecoding,
    ];
    let mut messages: Vec<&str> = variants.iter().map(|&e| decoder.err_str(e)).collect();
    messages.sort_unstable();
    messages.dedup();
    assert_eq!(messages.len(), variants.len());
}

#[test]
fn invalid_header_state_is_idempotent_across_reject_calls() {
    let data = header(2, 1, 1, 24, 0x20)[..10].to_vec();
    let mut decoder = Decoder::new();
    decoder.init(&data);
    assert_eq!(
        decoder.validate_header(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT),
        Err(TgaError::InvalidHeader)
    );
    assert_eq!(decoder.state(), State::InvalidHeader);
    for _ in 0..3 {
        assert_eq!(
            decoder.validate_header(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT),
            Err(TgaError::InvalidHeader)
        );
        assert_eq!(decoder.state(), State::InvalidHeader);
    }
}

#[test]
fn need_header_validation_before_decode() {
    let data = header(2, 1, 1, 24, 0x20);
    let mut decoder = Decoder::new();
    decoder.init(&data);
    assert_eq!(decoder.decode(), Err(TgaError::NeedHeaderValidation));
    assert_eq!(decoder.state(), State::Initialized);
}

#[test]
fn need_decoding_before_detach() {
    let data = header(2, 1, 1, 24, 0x20);
    let mut decoder = Decoder::new();
    decoder.init(&data);
    decoder
        .validate_header(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT)
        .unwrap();
    assert_eq!(decoder.detach(), Err(TgaError::NeedDecoding));
}

#[test]
fn detach_succeeds_after_aborted_decode() {
    // Valid header but the buffer ends exactly at the pixel data boundary: decode aborts, yet
    // the partial raster it produced can still be detached.
    let data = header(2, 4, 1, 24, 0x20);
    let mut decoder = Decoder::new();
    decoder.init(&data);
    decoder
        .validate_header(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT)
        .unwrap();
    assert_eq!(decoder.decode(), Err(TgaError::TruncDataAbort));
    assert_eq!(decoder.state(), State::DecodingAbort);
    assert!(decoder.detach().is_ok());
}

#[test]
fn reinitializing_resets_lifecycle_state() {
    let bad = header(2, 1, 1, 24, 0x20)[..10].to_vec();
    let mut decoder = Decoder::new();
    decoder.init(&bad);
    assert_eq!(
        decoder.validate_header(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT),
        Err(TgaError::InvalidHeader)
    );
    assert_eq!(decoder.state(), State::InvalidHeader);

    let good = header(2, 1, 1, 24, 0x20);
    decoder.init(&good);
    assert_eq!(decoder.state(), State::Initialized);
    assert_eq!(
        decoder.validate_header(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT),
        Ok(())
    );
}
