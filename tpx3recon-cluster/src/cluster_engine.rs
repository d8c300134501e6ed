//! ST-DBSCAN: spatio-temporal density clustering over a time-sorted signal
//! array, bounded by a [`NeighborIndex`] window rather than a linear scan.

use tpx3recon_core::SignalRecord;

use crate::group::GroupId;
use crate::neighbor_index::NeighborIndex;

/// Clustering tunables, mirroring [`PipelineConfig`](tpx3recon_core::PipelineConfig)'s
/// `eps_spatial`/`eps_temporal`/`min_pts`/`query_region` fields.
#[derive(Debug, Clone, Copy)]
pub struct ClusterParams {
    pub eps_spatial: u32,
    pub eps_temporal: f64,
    pub min_pts: usize,
    pub query_region: usize,
}

/// Charge-weighted running sums for one cluster, folded in as each member is
/// first admitted.
#[derive(Debug, Clone, Default)]
pub struct ClusterAccumulator {
    pub sum_x_weighted: f64,
    pub sum_y_weighted: f64,
    pub sum_toa_weighted: f64,
    pub sum_tot: u64,
    pub multiplicity: usize,
}

impl ClusterAccumulator {
    fn fold(&mut self, signal: &SignalRecord) {
        let weight = f64::from(signal.tot_final);
        self.sum_x_weighted += f64::from(signal.x_pixel) * weight;
        self.sum_y_weighted += f64::from(signal.y_pixel) * weight;
        self.sum_toa_weighted += signal.toa_final * weight;
        self.sum_tot += u64::from(signal.tot_final);
        self.multiplicity += 1;
    }
}

fn spatial_distance(a: &SignalRecord, b: &SignalRecord) -> f64 {
    let dx = f64::from(a.x_pixel) - f64::from(b.x_pixel);
    let dy = f64::from(a.y_pixel) - f64::from(b.y_pixel);
    (dx * dx + dy * dy).sqrt()
}

fn is_neighbor(a: &SignalRecord, b: &SignalRecord, params: &ClusterParams) -> bool {
    a.signal_type.is_pixel()
        && b.signal_type.is_pixel()
        && spatial_distance(a, b) <= f64::from(params.eps_spatial)
        && (a.toa_final - b.toa_final).abs() <= params.eps_temporal
}

fn region_query(
    signals: &[SignalRecord],
    home: usize,
    params: &ClusterParams,
    index: &NeighborIndex,
) -> Vec<usize> {
    let (lo, hi) = index.bounds(home);
    (lo..=hi).filter(|&j| is_neighbor(&signals[home], &signals[j], params)).collect()
}

/// Runs ST-DBSCAN over `signals`, assigning `group_id` in place and
/// returning one [`ClusterAccumulator`] per cluster discovered, in discovery
/// order (so accumulator `k` belongs to cluster id `k + GroupId::FIRST_CLUSTER_ID`).
///
/// `signals` must already be sorted by `toa_final`; the neighbor index
/// assumes array position tracks time.
pub fn cluster(signals: &mut [SignalRecord], params: &ClusterParams) -> Vec<ClusterAccumulator> {
    let index = NeighborIndex::new(signals.len(), params.query_region);
    let mut accumulators = Vec::new();
    let mut next_id = GroupId::FIRST_CLUSTER_ID;

    for i in 0..signals.len() {
        if !signals[i].signal_type.is_pixel() {
            continue;
        }
        if GroupId::from_sentinel(signals[i].group_id) != GroupId::Unvisited {
            continue;
        }

        let neighbors = region_query(signals, i, params, &index);
        if neighbors.len() < params.min_pts {
            signals[i].group_id = GroupId::Noise.to_sentinel();
            continue;
        }

        let cluster_id = next_id;
        next_id += 1;

        let mut accumulator = ClusterAccumulator::default();
        signals[i].group_id = GroupId::Cluster(cluster_id).to_sentinel();
        accumulator.fold(&signals[i]);

        let mut queue = neighbors;
        let mut cursor = 0;
        while cursor < queue.len() {
            let q = queue[cursor];
            cursor += 1;

            if !signals[q].signal_type.is_pixel() {
                continue;
            }
            if GroupId::from_sentinel(signals[q].group_id) != GroupId::Unvisited {
                continue;
            }

            signals[q].group_id = GroupId::Cluster(cluster_id).to_sentinel();
            accumulator.fold(&signals[q]);

            let q_neighbors = region_query(signals, q, params, &index);
            if q_neighbors.len() >= params.min_pts {
                queue.extend(q_neighbors);
            }
        }

        accumulators.push(accumulator);
    }

    accumulators
}
