//! Finalizes a [`ClusterAccumulator`] into a [`PhotonRecord`].

use tpx3recon_core::{Error, PhotonRecord, Result};

use crate::cluster_engine::ClusterAccumulator;

/// Computes the charge-weighted centroid of a finished cluster.
///
/// Fails with [`Error::DegenerateCluster`] if the cluster's accumulated
/// weight is zero, which only happens if every member's `tot_final` was
/// zero.
pub fn emit(accumulator: &ClusterAccumulator) -> Result<PhotonRecord> {
    if accumulator.sum_tot == 0 {
        return Err(Error::DegenerateCluster);
    }

    let sum_tot = accumulator.sum_tot as f64;
    Ok(PhotonRecord {
        photon_x: (accumulator.sum_x_weighted / sum_tot) as f32,
        photon_y: (accumulator.sum_y_weighted / sum_tot) as f32,
        photon_toa: accumulator.sum_toa_weighted / sum_tot,
        integrated_tot: u16::try_from(accumulator.sum_tot).unwrap_or(u16::MAX),
        multiplicity: u8::try_from(accumulator.multiplicity).unwrap_or(u8::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn emits_weighted_centroid() {
        let acc = ClusterAccumulator {
            sum_x_weighted: 3300.0,
            sum_y_weighted: 6000.0,
            sum_toa_weighted: 30.0,
            sum_tot: 300,
            multiplicity: 3,
        };
        let photon = emit(&acc).unwrap();
        assert_relative_eq!(photon.photon_x, 11.0);
        assert_relative_eq!(photon.photon_y, 20.0);
        assert_eq!(photon.integrated_tot, 300);
        assert_eq!(photon.multiplicity, 3);
    }

    #[test]
    fn zero_weight_is_degenerate() {
        let acc = ClusterAccumulator::default();
        assert!(matches!(emit(&acc), Err(Error::DegenerateCluster)));
    }

    #[test]
    fn saturates_rather_than_overflowing() {
        let acc = ClusterAccumulator {
            sum_x_weighted: 0.0,
            sum_y_weighted: 0.0,
            sum_toa_weighted: 0.0,
            sum_tot: u64::from(u16::MAX) + 1000,
            multiplicity: 400,
        };
        let photon = emit(&acc).unwrap();
        assert_eq!(photon.integrated_tot, u16::MAX);
        assert_eq!(photon.multiplicity, u8::MAX);
    }
}
