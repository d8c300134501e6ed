//! Wires the decode, sort, cluster, and write stages together into one run,
//! timing each stage the way `unpackAndSortTPX3File` measured unpack/sort/
//! cluster/write durations into `tpx3FileDiagnostics`.

use std::time::Instant;

use tpx3recon_cluster::{cluster, emit, sort_by_toa, ClusterParams};
use tpx3recon_core::{Diagnostics, PhotonRecord, PipelineConfig};
use tpx3recon_decode::walk;

use crate::reader::MappedFile;
use crate::writer::{PhotonWriter, SignalWriter};
use crate::Result;

/// Output of a full reconstruction run.
pub struct RunOutcome {
    pub diagnostics: Diagnostics,
    pub photons: Vec<PhotonRecord>,
}

/// Runs the full pipeline against `config`: decode the mapped input, sort if
/// requested, dump raw signals if requested, cluster and emit photons if
/// requested, write photons if requested.
pub fn run(config: &PipelineConfig) -> Result<RunOutcome> {
    let total_start = Instant::now();

    let mapped = MappedFile::open(config.input_path())?;
    let mut diagnostics = Diagnostics { filesize: mapped.len() as u64, ..Diagnostics::default() };
    diagnostics.number_of_data_packets = diagnostics.filesize / 8;

    let words = mapped.words()?;

    let decode_start = Instant::now();
    let outcome = walk(&words, config.max_packets_to_read);
    diagnostics.decode_time = decode_start.elapsed();

    let mut signals = outcome.signals;
    merge_packet_diagnostics(&mut diagnostics, outcome.diagnostics);

    if config.sort_signals {
        let sort_start = Instant::now();
        sort_by_toa(&mut signals);
        diagnostics.sort_time = sort_start.elapsed();
    }

    if config.write_raw_signals {
        let write_start = Instant::now();
        let mut writer = SignalWriter::create(config.raw_signals_path())?;
        writer.write_all(&signals)?;
        diagnostics.write_time += write_start.elapsed();
    }

    let mut photons = Vec::new();
    if config.cluster_pixels {
        let cluster_start = Instant::now();
        let params = ClusterParams {
            eps_spatial: config.eps_spatial,
            eps_temporal: config.eps_temporal,
            min_pts: config.min_pts,
            query_region: config.query_region,
        };
        let accumulators = cluster(&mut signals, &params);
        diagnostics.cluster_time = cluster_start.elapsed();

        diagnostics.number_of_clusters = accumulators.len() as u64;
        diagnostics.number_of_noise_signals = signals
            .iter()
            .filter(|s| tpx3recon_cluster::GroupId::from_sentinel(s.group_id) == tpx3recon_cluster::GroupId::Noise)
            .count() as u64;

        for accumulator in &accumulators {
            match emit(accumulator) {
                Ok(photon) => photons.push(photon),
                Err(_) => diagnostics.number_of_degenerate_clusters += 1,
            }
        }
        diagnostics.number_of_photons = photons.len() as u64;

        if config.write_out_photons {
            let write_start = Instant::now();
            let mut csv_writer = PhotonWriter::create(config.photons_csv_path())?;
            csv_writer.write_csv(&photons)?;
            let mut binary_writer = PhotonWriter::create(config.photons_binary_path())?;
            binary_writer.write_binary(&photons)?;
            diagnostics.write_time += write_start.elapsed();
        }
    }

    diagnostics.total_time = total_start.elapsed();

    Ok(RunOutcome { diagnostics, photons })
}

fn merge_packet_diagnostics(into: &mut Diagnostics, from: Diagnostics) {
    into.number_of_processed_packets = from.number_of_processed_packets;
    into.number_of_buffers = from.number_of_buffers;
    into.number_of_pixel_hits = from.number_of_pixel_hits;
    into.number_of_tdcs = from.number_of_tdcs;
    into.number_of_gts = from.number_of_gts;
    into.number_of_spidr_controls = from.number_of_spidr_controls;
    into.number_of_tpx3_controls = from.number_of_tpx3_controls;
    into.number_of_unknown_packets = from.number_of_unknown_packets;
    into.number_of_framing_errors = from.number_of_framing_errors;
}
