//! Smart file reading for CSV sources.
//!
//! Small files are read straight into a String; anything above 1 MiB is
//! memory-mapped first. Either way the caller gets owned UTF-8 text, and
//! invalid UTF-8 is an error with file context rather than silent loss.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

/// Read a source file fully into UTF-8 text.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

    if metadata.len() > MMAP_THRESHOLD {
        let file =
            File::open(path).with_context(|| format!("Failed to open file {}", path.display()))?;

        // Safety: we only read the mapping; the file is not ours to mutate
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to memory-map {}", path.display()))?;

        let text = std::str::from_utf8(&mmap)
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
        Ok(text.to_owned())
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_small_files_verbatim() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "codigo,clave\nA1,K1\n").unwrap();
        let text = read_source(tmp.path()).unwrap();
        assert_eq!(text, "codigo,clave\nA1,K1\n");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = read_source("definitely/not/here.csv").unwrap_err();
        assert!(format!("{err:#}").contains("not/here.csv"));
    }
}
