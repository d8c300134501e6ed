//! The reconstructed photon record emitted from a finished cluster.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A charge-weighted centroid reconstructed from a cluster of pixel signals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhotonRecord {
    /// Charge-weighted centroid column.
    pub photon_x: f32,
    /// Charge-weighted centroid row.
    pub photon_y: f32,
    /// Charge-weighted mean time of arrival, in seconds.
    pub photon_toa: f64,
    /// Sum of `tot_final` over the cluster's pixel signals, saturating.
    pub integrated_tot: u16,
    /// Number of pixel signals folded into the cluster, saturating.
    pub multiplicity: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photon_record_is_plain_data() {
        let p = PhotonRecord {
            photon_x: 11.0,
            photon_y: 20.0,
            photon_toa: 0.000_000_5,
            integrated_tot: 300,
            multiplicity: 3,
        };
        assert_eq!(p.multiplicity, 3);
    }
}
