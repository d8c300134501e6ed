//! Run-level counters and stage timings, printed by the CLI at
//! `verbose_level >= 1` and returned by the pipeline on every run.

use std::time::Duration;

/// Counts and durations accumulated over one reconstruction run.
///
/// Mirrors the original `tpx3FileDiagnostics` struct: a flat bag of counters
/// plus one `Duration` per pipeline stage, rather than a nested report type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    /// Size of the input file in bytes.
    pub filesize: u64,
    /// `filesize / 8`, the number of 64-bit words in the file.
    pub number_of_data_packets: u64,
    /// Number of words actually walked (bounded by `max_packets_to_read`).
    pub number_of_processed_packets: u64,
    /// Number of chunks walked, including a partially consumed final chunk.
    pub number_of_buffers: u64,
    /// Pixel-hit packets decoded.
    pub number_of_pixel_hits: u64,
    /// TDC packets decoded.
    pub number_of_tdcs: u64,
    /// Global-timestamp packets decoded.
    pub number_of_gts: u64,
    /// SPIDR control packets decoded.
    pub number_of_spidr_controls: u64,
    /// TPX3 control packets decoded.
    pub number_of_tpx3_controls: u64,
    /// Packets seen but not decoded (integrated-ToT mode, unrecognized nibble).
    pub number_of_unknown_packets: u64,
    /// Times a chunk header was expected but not found.
    pub number_of_framing_errors: u64,
    /// Signals assigned `group_id == 1` (noise).
    pub number_of_noise_signals: u64,
    /// Distinct clusters discovered.
    pub number_of_clusters: u64,
    /// Clusters whose accumulated weight was zero, so no photon was emitted.
    pub number_of_degenerate_clusters: u64,
    /// Photons written to output.
    pub number_of_photons: u64,
    /// Wall-clock time spent decoding.
    pub decode_time: Duration,
    /// Wall-clock time spent sorting.
    pub sort_time: Duration,
    /// Wall-clock time spent clustering.
    pub cluster_time: Duration,
    /// Wall-clock time spent writing output.
    pub write_time: Duration,
    /// Wall-clock time spent on the whole run.
    pub total_time: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_zero() {
        let diag = Diagnostics::default();
        assert_eq!(diag.number_of_buffers, 0);
        assert_eq!(diag.total_time, Duration::ZERO);
    }
}
