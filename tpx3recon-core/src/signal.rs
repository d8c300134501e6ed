//! The decoded signal record, one per packet the stream walker emits.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of packet a signal was decoded from.
///
/// The numeric values match the `group_id`-adjacent `signal_type` field of
/// the original telemetry record layout: `0` is reserved for packets that
/// were counted but not decoded (integrated-ToT mode, unrecognized types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SignalKind {
    /// Counted but not decoded (integrated-ToT mode or an unrecognized top nibble).
    Unknown = 0,
    /// Time-difference-counter packet.
    Tdc = 1,
    /// Pixel hit.
    Pixel = 2,
    /// Global timestamp packet (time-low or time-high).
    Gts = 3,
    /// SPIDR control packet (shutter open/close, heartbeat).
    SpidrControl = 4,
    /// TPX3 control packet (end of readout).
    Tpx3Control = 5,
}

impl SignalKind {
    /// Whether this signal participates in spatio-temporal clustering.
    #[inline]
    pub fn is_pixel(self) -> bool {
        matches!(self, SignalKind::Pixel)
    }
}

/// A single decoded signal, corresponding to one packet in the telemetry
/// stream.
///
/// Fields for non-pixel signal kinds carry zeroed positional/time data; see
/// the decoder for exactly which fields each kind populates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalRecord {
    /// Index of the chunk this signal was decoded from, 1-based to match the
    /// original buffer-counting convention.
    pub buffer_number: u32,
    /// What kind of packet this was.
    pub signal_type: SignalKind,
    /// Pixel column, meaningful only when `signal_type == Pixel`.
    pub x_pixel: u8,
    /// Pixel row, meaningful only when `signal_type == Pixel`.
    pub y_pixel: u8,
    /// Time of arrival in seconds.
    pub toa_final: f64,
    /// Time over threshold in nanoseconds.
    pub tot_final: u16,
    /// Cluster membership sentinel: `0` unvisited, `1` noise, `>= 2` cluster id.
    pub group_id: u32,
}

impl SignalRecord {
    /// Builds a signal record with `group_id` left unvisited.
    pub fn new(
        buffer_number: u32,
        signal_type: SignalKind,
        x_pixel: u8,
        y_pixel: u8,
        toa_final: f64,
        tot_final: u16,
    ) -> Self {
        Self {
            buffer_number,
            signal_type,
            x_pixel,
            y_pixel,
            toa_final,
            tot_final,
            group_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_kind_participates_in_clustering() {
        assert!(SignalKind::Pixel.is_pixel());
        assert!(!SignalKind::Tdc.is_pixel());
        assert!(!SignalKind::Unknown.is_pixel());
    }

    #[test]
    fn new_signal_starts_unvisited() {
        let sig = SignalRecord::new(1, SignalKind::Pixel, 10, 20, 1.5, 100);
        assert_eq!(sig.group_id, 0);
        assert_eq!(sig.x_pixel, 10);
        assert_eq!(sig.y_pixel, 20);
    }
}
