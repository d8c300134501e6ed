//! Walks a contiguous array of 64-bit words as a sequence of length-prefixed
//! chunks, decoding each packet and folding counts into a [`Diagnostics`].
//!
//! Modeled as an explicit two-state machine (`ExpectHeader` / `InChunk`)
//! rather than a switch nested inside a while loop, so the framing protocol
//! reads the same way it executes.

use tpx3recon_core::{Diagnostics, SignalKind, SignalRecord};

use crate::decoder::decode_word;
use crate::packet::Tpx3Word;

enum WalkState {
    ExpectHeader,
    InChunk { remaining: u64 },
}

/// Result of walking one word array.
pub struct WalkOutcome {
    pub signals: Vec<SignalRecord>,
    pub diagnostics: Diagnostics,
}

/// Walks `words`, decoding up to `max_packets_to_read` packets (`0` means no
/// cap). Chunk headers are never themselves emitted as signals.
pub fn walk(words: &[u64], max_packets_to_read: u64) -> WalkOutcome {
    let limit = if max_packets_to_read == 0 {
        u64::MAX
    } else {
        max_packets_to_read
    };

    let mut diagnostics = Diagnostics::default();
    let mut signals = Vec::new();

    let mut state = WalkState::ExpectHeader;
    let mut word_idx: usize = 0;
    let mut processed: u64 = 0;
    let mut buffer_number: u32 = 0;
    let mut chunks_seen: u64 = 0;

    while word_idx < words.len() && processed < limit {
        let word = Tpx3Word::new(words[word_idx]);

        state = match state {
            WalkState::ExpectHeader => {
                if word.is_header() {
                    buffer_number += 1;
                    chunks_seen += 1;
                    let n = (word.chunk_size_bytes() / 8).min(limit - processed);
                    word_idx += 1;
                    WalkState::InChunk { remaining: n }
                } else {
                    diagnostics.number_of_framing_errors += 1;
                    word_idx += 1;
                    WalkState::ExpectHeader
                }
            }
            WalkState::InChunk { remaining } => {
                if remaining == 0 {
                    WalkState::ExpectHeader
                } else if word.is_header() {
                    // A header where a payload word was expected: abort the
                    // chunk and let the next iteration reinterpret this word
                    // as a fresh header.
                    diagnostics.number_of_framing_errors += 1;
                    WalkState::ExpectHeader
                } else {
                    let signal = decode_word(word, buffer_number);
                    count_signal(&mut diagnostics, signal.signal_type);
                    signals.push(signal);
                    word_idx += 1;
                    processed += 1;
                    WalkState::InChunk { remaining: remaining - 1 }
                }
            }
        };
    }

    // A run with no chunks still reports one logical buffer.
    diagnostics.number_of_buffers = chunks_seen.max(1);
    diagnostics.number_of_processed_packets = processed;

    WalkOutcome { signals, diagnostics }
}

fn count_signal(diagnostics: &mut Diagnostics, kind: SignalKind) {
    match kind {
        SignalKind::Pixel => diagnostics.number_of_pixel_hits += 1,
        SignalKind::Tdc => diagnostics.number_of_tdcs += 1,
        SignalKind::Gts => diagnostics.number_of_gts += 1,
        SignalKind::SpidrControl => diagnostics.number_of_spidr_controls += 1,
        SignalKind::Tpx3Control => diagnostics.number_of_tpx3_controls += 1,
        SignalKind::Unknown => diagnostics.number_of_unknown_packets += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(chunk_size_bytes: u64) -> u64 {
        Tpx3Word::HEADER_MAGIC | (chunk_size_bytes << 48)
    }

    fn pixel_word() -> u64 {
        0xB000_0000_0000_0000
    }

    #[test]
    fn empty_input_yields_no_signals_and_one_buffer() {
        let out = walk(&[], 0);
        assert!(out.signals.is_empty());
        assert_eq!(out.diagnostics.number_of_buffers, 1);
    }

    #[test]
    fn single_tdc_packet_decodes() {
        let words = [header(8), 0x6000_0000_0064_0020];
        let out = walk(&words, 0);
        assert_eq!(out.signals.len(), 1);
        assert_eq!(out.diagnostics.number_of_tdcs, 1);
        assert_eq!(out.diagnostics.number_of_buffers, 1);
    }

    #[test]
    fn two_consecutive_chunks_each_decode() {
        let words = [header(8), pixel_word(), header(8), pixel_word()];
        let out = walk(&words, 0);
        assert_eq!(out.signals.len(), 2);
        assert_eq!(out.diagnostics.number_of_buffers, 2);
    }

    #[test]
    fn packet_cap_truncates_processing() {
        let mut words = vec![header(1000 * 8)];
        words.extend(std::iter::repeat(pixel_word()).take(1000));
        let out = walk(&words, 100);
        assert_eq!(out.diagnostics.number_of_processed_packets, 100);
        assert_eq!(out.signals.len(), 100);
    }

    #[test]
    fn missing_header_is_a_framing_error_and_advances_one_word() {
        let words = [pixel_word(), header(8), pixel_word()];
        let out = walk(&words, 0);
        assert_eq!(out.diagnostics.number_of_framing_errors, 1);
        assert_eq!(out.signals.len(), 1);
    }
}
