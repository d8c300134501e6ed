//! Command-line entry point for TPX3 telemetry decoding and photon
//! reconstruction.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use tpx3recon_core::PipelineConfig;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] tpx3recon_io::Error),
}

/// TPX3 telemetry decoder and ST-DBSCAN photon reconstruction pipeline.
#[derive(Parser)]
#[command(name = "tpx3recon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full reconstruction pipeline on a TPX3 file.
    Run {
        /// Path to a configuration file (key = value format).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Input .tpx3 file; overrides rawTPX3Folder/rawTPX3File from the config file.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory; overrides outputFolder.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sort decoded signals by time of arrival before clustering.
        #[arg(long)]
        sort_signals: bool,

        /// Run ST-DBSCAN clustering and emit photons.
        #[arg(long)]
        cluster_pixels: bool,

        /// Write the decoded signal stream to <runHandle>.rawSignals.
        #[arg(long)]
        write_raw_signals: bool,

        /// Write reconstructed photons to <runHandle>.photons(.csv).
        #[arg(long)]
        write_out_photons: bool,

        /// Spatial clustering radius, in pixels.
        #[arg(long)]
        eps_spatial: Option<u32>,

        /// Temporal clustering radius, in seconds.
        #[arg(long)]
        eps_temporal: Option<f64>,

        /// Minimum neighborhood size to avoid noise.
        #[arg(long)]
        min_pts: Option<usize>,

        /// Half-width of the neighbor-index search window.
        #[arg(long)]
        query_region: Option<usize>,

        /// Cap on packets processed; 0 reads the whole file.
        #[arg(long)]
        max_packets_to_read: Option<u64>,

        /// Diagnostic verbosity, 1 (quiet) through 4 (per-packet trace).
        #[arg(short, long)]
        verbose_level: Option<u8>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            input,
            output,
            sort_signals,
            cluster_pixels,
            write_raw_signals,
            write_out_photons,
            eps_spatial,
            eps_temporal,
            min_pts,
            query_region,
            max_packets_to_read,
            verbose_level,
        } => {
            let mut params = match config {
                Some(path) => tpx3recon_io::load_config(&path)?,
                None => PipelineConfig::default(),
            };

            if let Some(input) = input {
                params.raw_tpx3_folder =
                    input.parent().map(|p| p.display().to_string()).unwrap_or_default();
                params.raw_tpx3_file =
                    input.file_name().map(|f| f.to_string_lossy().into_owned()).unwrap_or_default();
            }
            if let Some(output) = output {
                params.output_folder = output.display().to_string();
            }
            if sort_signals {
                params.sort_signals = true;
            }
            if cluster_pixels {
                params.cluster_pixels = true;
            }
            if write_raw_signals {
                params.write_raw_signals = true;
            }
            if write_out_photons {
                params.write_out_photons = true;
            }
            if let Some(v) = eps_spatial {
                params.eps_spatial = v;
            }
            if let Some(v) = eps_temporal {
                params.eps_temporal = v;
            }
            if let Some(v) = min_pts {
                params.min_pts = v;
            }
            if let Some(v) = query_region {
                params.query_region = v;
            }
            if let Some(v) = max_packets_to_read {
                params.max_packets_to_read = v;
            }
            if let Some(v) = verbose_level {
                params.verbose_level = v;
            }

            if params.verbose_level >= 2 {
                print_parameters(&params);
            }

            let outcome = tpx3recon_io::run(&params)?;

            if params.verbose_level >= 1 {
                println!("input: {}", params.input_path().display());
                println!("filesize: {} bytes", outcome.diagnostics.filesize);
                println!("pixel hits: {}", outcome.diagnostics.number_of_pixel_hits);
                println!("photons: {}", outcome.diagnostics.number_of_photons);
                println!("total time: {:.3?}", outcome.diagnostics.total_time);
            }
            if params.verbose_level >= 3 {
                println!("buffers: {}", outcome.diagnostics.number_of_buffers);
                println!("framing errors: {}", outcome.diagnostics.number_of_framing_errors);
                println!("noise signals: {}", outcome.diagnostics.number_of_noise_signals);
                println!("degenerate clusters: {}", outcome.diagnostics.number_of_degenerate_clusters);
                println!("decode time: {:.3?}", outcome.diagnostics.decode_time);
                println!("sort time: {:.3?}", outcome.diagnostics.sort_time);
                println!("cluster time: {:.3?}", outcome.diagnostics.cluster_time);
                println!("write time: {:.3?}", outcome.diagnostics.write_time);
            }
        }
    }

    Ok(())
}

fn print_parameters(params: &PipelineConfig) {
    println!("=================== Config parameters ====================");
    println!("inputTPX3Folder: {}", params.raw_tpx3_folder);
    println!("inputTPX3File: {}", params.raw_tpx3_file);
    println!("writeRawSignals: {}", params.write_raw_signals);
    println!("outputFolder: {}", params.output_folder);
    println!("maxPacketsToRead: {}", params.max_packets_to_read);
    println!("sortSignals: {}", params.sort_signals);
    println!("verboseLevel: {}", params.verbose_level);
    println!("clusterPixels: {}", params.cluster_pixels);
    println!("writeOutPhotons: {}", params.write_out_photons);
    println!("epsSpatial: {}", params.eps_spatial);
    println!("epsTemporal: {}", params.eps_temporal);
    println!("minPts: {}", params.min_pts);
    println!("=========================================================");
}
