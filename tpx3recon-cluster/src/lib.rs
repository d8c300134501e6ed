//! tpx3recon-cluster: sorting, the bounded neighbor index, ST-DBSCAN
//! clustering, and charge-weighted centroid extraction.

mod cluster_engine;
mod group;
mod neighbor_index;
mod photon_emitter;
mod sorter;

pub use cluster_engine::{cluster, ClusterAccumulator, ClusterParams};
pub use group::GroupId;
pub use neighbor_index::NeighborIndex;
pub use photon_emitter::emit;
pub use sorter::sort_by_toa;
