//! Disk side of a completed fetch: temp-file write, then atomic rename.
//!
//! A booth PDF is only visible at its final path once fully written, so the
//! worker's exists-check never mistakes a partial file for a complete one.
//! A crash mid-write leaves only a `.part` file, which re-runs overwrite.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path
/// (e.g. `45.pdf` → `45.pdf.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Write `body` to `final_path` atomically: create parent directories, write
/// the whole body to a sibling `.part` file, sync, then rename into place.
pub fn write_atomic(final_path: &Path, body: &[u8]) -> io::Result<()> {
    if let Some(parent) = final_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = temp_path(final_path);
    let mut file = fs::File::create(&tmp)?;
    file.write_all(body)?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, final_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("45.pdf"));
        assert_eq!(p.to_string_lossy(), "45.pdf.part");
        let p2 = temp_path(Path::new("/out/12 - Alpha/3.pdf"));
        assert_eq!(p2.to_string_lossy(), "/out/12 - Alpha/3.pdf.part");
    }

    #[test]
    fn write_creates_parents_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("12 - Alpha").join("45.pdf");

        write_atomic(&dest, b"roll body").unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"roll body");
        assert!(!temp_path(&dest).exists());
    }

    #[test]
    fn write_replaces_stale_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("45.pdf");
        fs::write(temp_path(&dest), b"truncated leftover").unwrap();

        write_atomic(&dest, b"complete").unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"complete");
        assert!(!temp_path(&dest).exists());
    }
}
