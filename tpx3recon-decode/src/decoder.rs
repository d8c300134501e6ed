//! BitDecoder: pure functions turning one [`Tpx3Word`] into a [`SignalRecord`].
//!
//! Each function takes only the word and the buffer number it belongs to;
//! there is no shared mutable state here, so the stream walker can call
//! these freely while holding nothing but a slice and an index.

use tpx3recon_core::{SignalKind, SignalRecord};

use crate::packet::Tpx3Word;

/// SPIDR control subtype: open shutter.
pub const SPIDR_OPEN_SHUTTER: u8 = 0xF;
/// SPIDR control subtype: close shutter.
pub const SPIDR_CLOSE_SHUTTER: u8 = 0xA;
/// SPIDR control subtype: heartbeat.
pub const SPIDR_HEARTBEAT: u8 = 0xC;

/// TPX3 control subtype: end of sequential readout.
pub const TPX3_END_SEQUENTIAL_READOUT: u8 = 0xA0;
/// TPX3 control subtype: end of data-driven readout.
pub const TPX3_END_DATA_DRIVEN_READOUT: u8 = 0xB0;

/// Decodes `word` according to its top nibble, dispatching to the per-kind
/// decoders below. Unrecognized top nibbles and integrated-ToT mode packets
/// (`0xA`) decode to [`SignalKind::Unknown`].
pub fn decode_word(word: Tpx3Word, buffer_number: u32) -> SignalRecord {
    match word.top_nibble() {
        0xB => decode_pixel(word, buffer_number),
        0x6 => decode_tdc(word, buffer_number),
        0x4 => decode_gts(word, buffer_number),
        0x5 => decode_spidr_control(word, buffer_number),
        0x7 => decode_tpx3_control(word, buffer_number),
        _ => decode_unknown(word, buffer_number),
    }
}

/// Decodes a pixel-hit packet (top nibble `0xB`).
pub fn decode_pixel(word: Tpx3Word, buffer_number: u32) -> SignalRecord {
    let spidr_time = word.spidr_time();
    let dcol = word.pixel_dcol();
    let spix = word.pixel_spix();
    let pix = word.pixel_pix();
    let x_pixel = (dcol + pix / 4) as u8;
    let y_pixel = (spix + (pix & 0x3)) as u8;

    let toa_raw = word.pixel_toa_raw();
    let tot_raw = word.pixel_tot_raw();
    let ftoa = word.pixel_ftoa();
    let coarse_toa = (toa_raw << 4) | ((!ftoa) & 0xF);

    let spidr_ns = spidr_time as f64 * 25.0 * 16384.0;
    let tot_final = (tot_raw * 25) as u16;
    let toa_final = (spidr_ns + coarse_toa as f64 * (25.0 / 16.0)) * 1e-9;

    SignalRecord::new(buffer_number, SignalKind::Pixel, x_pixel, y_pixel, toa_final, tot_final)
}

/// Decodes a TDC packet (top nibble `0x6`).
pub fn decode_tdc(word: Tpx3Word, buffer_number: u32) -> SignalRecord {
    let coarse_time = word.tdc_coarse_time();
    // Mirrors the original unsigned-arithmetic rollover of `tmp_fine - 1`
    // when `tmp_fine == 0`.
    let tmp_fine = (word.tdc_tmp_fine().wrapping_sub(1) << 9) / 12;
    let trig_time_fine = word.tdc_fine_bits() | (tmp_fine & 0x1FF);

    let toa_final = (coarse_time as f64 * 25.0 + trig_time_fine as f64 * 25.0 / 4096.0) * 1e-9;

    SignalRecord::new(buffer_number, SignalKind::Tdc, 0, 0, toa_final, 0)
}

/// Decodes a global-timestamp packet (top nibble `0x4`), dispatching on the
/// time-low (`0x44`) / time-high (`0x45`) subtype byte.
pub fn decode_gts(word: Tpx3Word, buffer_number: u32) -> SignalRecord {
    let toa_final = match word.gts_subtype() {
        0x44 => word.gts_time_low_counter() as f64 * 25.0 * 1e-9,
        0x45 => word.gts_time_high_counter() as f64 * 107.374_182,
        _ => 0.0,
    };
    let tot_final = word.spidr_time() as u16;

    SignalRecord::new(buffer_number, SignalKind::Gts, 0, 0, toa_final, tot_final)
}

/// Decodes a SPIDR control packet (top nibble `0x5`). Shutter open/close and
/// heartbeat all carry zeroed positional and time fields.
pub fn decode_spidr_control(_word: Tpx3Word, buffer_number: u32) -> SignalRecord {
    SignalRecord::new(buffer_number, SignalKind::SpidrControl, 0, 0, 0.0, 0)
}

/// Decodes a TPX3 control packet (top nibble `0x7`), e.g. end of readout.
pub fn decode_tpx3_control(_word: Tpx3Word, buffer_number: u32) -> SignalRecord {
    SignalRecord::new(buffer_number, SignalKind::Tpx3Control, 0, 0, 0.0, 0)
}

/// Decodes a packet this version does not interpret: integrated-ToT mode
/// (top nibble `0xA`) or any other unrecognized top nibble.
pub fn decode_unknown(_word: Tpx3Word, buffer_number: u32) -> SignalRecord {
    SignalRecord::new(buffer_number, SignalKind::Unknown, 0, 0, 0.0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tdc_timestamp_matches_formula() {
        // coarse_time = 100, tmp_fine = 1 (so the fine correction cancels to
        // zero instead of wrapping), fine bits zero.
        let word = Tpx3Word::new(0x6000_0000_0064_0020);
        let sig = decode_tdc(word, 1);
        assert_relative_eq!(sig.toa_final, 100.0 * 25.0 * 1e-9, epsilon = 1e-15);
    }

    #[test]
    fn pixel_line_decodes_expected_coordinates() {
        // dcol=2, spix=0, pix=0 -> x=2, y=0
        let raw = (2u64 << 52) | (0u64 << 45) | (0u64 << 44);
        let word = Tpx3Word::new(raw | 0xB000_0000_0000_0000);
        let sig = decode_pixel(word, 1);
        assert_eq!(sig.x_pixel, 2);
        assert_eq!(sig.y_pixel, 0);
    }

    #[test]
    fn gts_time_high_uses_wraparound_period() {
        let raw = 0x4500_0000_0002_0000u64; // subtype 0x45, counter = 2
        let word = Tpx3Word::new(raw);
        let sig = decode_gts(word, 1);
        assert_relative_eq!(sig.toa_final, 2.0 * 107.374_182, epsilon = 1e-9);
    }

    #[test]
    fn unknown_packet_has_zero_signal_kind() {
        let word = Tpx3Word::new(0xA000_0000_0000_0000);
        let sig = decode_word(word, 1);
        assert_eq!(sig.signal_type, SignalKind::Unknown);
    }

    #[test]
    fn spidr_control_subtypes_match_named_constants() {
        for subtype in [SPIDR_OPEN_SHUTTER, SPIDR_CLOSE_SHUTTER, SPIDR_HEARTBEAT] {
            let word = Tpx3Word::new(0x5000_0000_0000_0000 | (u64::from(subtype) << 56));
            assert_eq!(word.spidr_control_subtype(), subtype);

            let sig = decode_word(word, 1);
            assert_eq!(sig.signal_type, SignalKind::SpidrControl);
            assert_eq!(sig.x_pixel, 0);
            assert_eq!(sig.y_pixel, 0);
            assert_eq!(sig.toa_final, 0.0);
        }
    }

    #[test]
    fn tpx3_control_subtypes_match_named_constants() {
        for subtype in [TPX3_END_SEQUENTIAL_READOUT, TPX3_END_DATA_DRIVEN_READOUT] {
            let word = Tpx3Word::new(0x7000_0000_0000_0000 | (u64::from(subtype) << 48));
            assert_eq!(word.tpx3_control_subtype(), subtype);

            let sig = decode_word(word, 1);
            assert_eq!(sig.signal_type, SignalKind::Tpx3Control);
            assert_eq!(sig.toa_final, 0.0);
        }
    }
}
