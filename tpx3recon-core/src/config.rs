//! Resolved configuration for a reconstruction run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// All tunables a reconstruction run reads, whether they came from a
/// configuration file or were overridden on the command line.
///
/// Defaults mirror the original telemetry processor's `configParameters`
/// struct: an all-disabled, single-file run unless told otherwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineConfig {
    /// Directory containing the input `.tpx3` file.
    pub raw_tpx3_folder: String,
    /// Input file name, relative to `raw_tpx3_folder`.
    pub raw_tpx3_file: String,
    /// Whether to dump decoded signals to a binary file.
    pub write_raw_signals: bool,
    /// Whether to write reconstructed photons to disk.
    pub write_out_photons: bool,
    /// Directory output files are written into.
    pub output_folder: String,
    /// Whether to sort signals by `toa_final` before clustering.
    pub sort_signals: bool,
    /// Whether to run the clustering stage at all.
    pub cluster_pixels: bool,
    /// Spatial clustering radius, in pixels.
    pub eps_spatial: u32,
    /// Temporal clustering radius, in seconds.
    pub eps_temporal: f64,
    /// Minimum neighborhood size (including the seed) to avoid noise.
    pub min_pts: usize,
    /// Half-width of the index window `NeighborIndex` searches.
    pub query_region: usize,
    /// Cap on packets processed; `0` means read the whole file.
    pub max_packets_to_read: u64,
    /// Diagnostic verbosity, `1` (quiet) through `4` (per-packet trace).
    pub verbose_level: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_tpx3_folder: String::new(),
            raw_tpx3_file: String::new(),
            write_raw_signals: false,
            write_out_photons: false,
            output_folder: ".".to_string(),
            sort_signals: false,
            cluster_pixels: false,
            eps_spatial: 0,
            eps_temporal: 0.0,
            min_pts: 1,
            query_region: 0,
            max_packets_to_read: 0,
            verbose_level: 1,
        }
    }
}

impl PipelineConfig {
    /// Full path to the input file.
    pub fn input_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.raw_tpx3_folder).join(&self.raw_tpx3_file)
    }

    /// Run handle derived from the input file name: everything before the
    /// last `.`, or the whole name if there is no extension.
    pub fn run_handle(&self) -> String {
        match self.raw_tpx3_file.rfind('.') {
            Some(idx) => self.raw_tpx3_file[..idx].to_string(),
            None => self.raw_tpx3_file.clone(),
        }
    }

    /// Path the raw-signal dump is written to, if enabled.
    pub fn raw_signals_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.output_folder).join(format!("{}.rawSignals", self.run_handle()))
    }

    /// Path the CSV photon output is written to, if enabled.
    pub fn photons_csv_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.output_folder).join(format!("{}.photons.csv", self.run_handle()))
    }

    /// Path the binary photon dump is written to, if enabled.
    pub fn photons_binary_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.output_folder).join(format!("{}.photons", self.run_handle()))
    }

    pub fn with_eps_spatial(mut self, eps_spatial: u32) -> Self {
        self.eps_spatial = eps_spatial;
        self
    }

    pub fn with_eps_temporal(mut self, eps_temporal: f64) -> Self {
        self.eps_temporal = eps_temporal;
        self
    }

    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    pub fn with_query_region(mut self, query_region: usize) -> Self {
        self.query_region = query_region;
        self
    }

    pub fn with_max_packets_to_read(mut self, max_packets_to_read: u64) -> Self {
        self.max_packets_to_read = max_packets_to_read;
        self
    }

    pub fn with_verbose_level(mut self, verbose_level: u8) -> Self {
        self.verbose_level = verbose_level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_original_defaults() {
        let cfg = PipelineConfig::default();
        assert!(!cfg.write_raw_signals);
        assert!(!cfg.cluster_pixels);
        assert_eq!(cfg.output_folder, ".");
        assert_eq!(cfg.verbose_level, 1);
        assert_eq!(cfg.min_pts, 1);
    }

    #[test]
    fn run_handle_strips_extension() {
        let cfg = PipelineConfig {
            raw_tpx3_file: "run042.tpx3".to_string(),
            ..Default::default()
        };
        assert_eq!(cfg.run_handle(), "run042");
    }

    #[test]
    fn run_handle_without_extension_is_unchanged() {
        let cfg = PipelineConfig {
            raw_tpx3_file: "run042".to_string(),
            ..Default::default()
        };
        assert_eq!(cfg.run_handle(), "run042");
    }

    #[test]
    fn builder_methods_chain() {
        let cfg = PipelineConfig::default()
            .with_eps_spatial(2)
            .with_eps_temporal(1e-8)
            .with_min_pts(3)
            .with_query_region(200);
        assert_eq!(cfg.eps_spatial, 2);
        assert_eq!(cfg.min_pts, 3);
        assert_eq!(cfg.query_region, 200);
    }
}
