//! Memory-mapped reading of a `.tpx3` telemetry file.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::Result;

/// A memory-mapped input file.
///
/// Uses `memmap2` to avoid copying the whole file into a `Vec` before the
/// stream walker can start, the same way the original reader mapped the raw
/// file rather than reading it in one `read_to_end`.
pub struct MappedFile {
    mmap: Mmap,
}

impl MappedFile {
    /// Opens `path` for memory-mapped reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap })
    }

    /// File size in bytes.
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Reinterprets the mapped bytes as a sequence of little-endian 64-bit
    /// words, one per telemetry packet slot.
    ///
    /// Returns an error if the file size is not a multiple of 8.
    pub fn words(&self) -> Result<Vec<u64>> {
        if !self.mmap.len().is_multiple_of(8) {
            return Err(crate::Error::InvalidFormat(format!(
                "file size {} is not a multiple of 8",
                self.mmap.len()
            )));
        }

        Ok(self
            .mmap
            .chunks_exact(8)
            .map(|chunk| u64::from_le_bytes(chunk.try_into().unwrap()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_file_length() {
        let mut file = NamedTempFile::new().unwrap();
        let data: Vec<u8> = (0..64u8).collect();
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        let mapped = MappedFile::open(file.path()).unwrap();
        assert_eq!(mapped.len(), 64);
        assert!(!mapped.is_empty());
    }

    #[test]
    fn decodes_little_endian_words() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&0x0102_0304_0506_0708u64.to_le_bytes())
            .unwrap();
        file.flush().unwrap();

        let mapped = MappedFile::open(file.path()).unwrap();
        let words = mapped.words().unwrap();
        assert_eq!(words, vec![0x0102_0304_0506_0708u64]);
    }

    #[test]
    fn rejects_sizes_not_a_multiple_of_eight() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 7]).unwrap();
        file.flush().unwrap();

        let mapped = MappedFile::open(file.path()).unwrap();
        assert!(mapped.words().is_err());
    }
}
