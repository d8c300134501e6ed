//! Output writers: the raw decoded-signal dump and the photon dump, each in
//! the same CSV-plus-binary dual format the teacher's `Tpx3FileWriter` used
//! for centroids.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tpx3recon_core::{PhotonRecord, SignalRecord};

use crate::Result;

/// Binary dump of decoded [`SignalRecord`]s, one fixed-layout record per
/// signal: `u32` buffer_number, `u8` signal_type, `u8` x_pixel, `u8`
/// y_pixel, `f64` toa_final, `u16` tot_final, `u32` group_id. 21 bytes per
/// record.
pub struct SignalWriter {
    writer: BufWriter<File>,
}

impl SignalWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { writer: BufWriter::new(file) })
    }

    pub fn write_all(&mut self, signals: &[SignalRecord]) -> Result<()> {
        for s in signals {
            self.writer.write_all(&s.buffer_number.to_le_bytes())?;
            self.writer.write_all(&[s.signal_type as u8])?;
            self.writer.write_all(&[s.x_pixel])?;
            self.writer.write_all(&[s.y_pixel])?;
            self.writer.write_all(&s.toa_final.to_le_bytes())?;
            self.writer.write_all(&s.tot_final.to_le_bytes())?;
            self.writer.write_all(&s.group_id.to_le_bytes())?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writer for reconstructed photons, in CSV or fixed-layout binary form.
pub struct PhotonWriter {
    writer: BufWriter<File>,
}

impl PhotonWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { writer: BufWriter::new(file) })
    }

    pub fn write_csv(&mut self, photons: &[PhotonRecord]) -> Result<()> {
        writeln!(self.writer, "photon_x,photon_y,photon_toa,integrated_tot,multiplicity")?;
        for p in photons {
            writeln!(
                self.writer,
                "{},{},{},{},{}",
                p.photon_x, p.photon_y, p.photon_toa, p.integrated_tot, p.multiplicity
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Fixed layout: `f32` photon_x, `f32` photon_y, `f64` photon_toa, `u16`
    /// integrated_tot, `u8` multiplicity. 19 bytes per record.
    pub fn write_binary(&mut self, photons: &[PhotonRecord]) -> Result<()> {
        for p in photons {
            self.writer.write_all(&p.photon_x.to_le_bytes())?;
            self.writer.write_all(&p.photon_y.to_le_bytes())?;
            self.writer.write_all(&p.photon_toa.to_le_bytes())?;
            self.writer.write_all(&p.integrated_tot.to_le_bytes())?;
            self.writer.write_all(&[p.multiplicity])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
