//! Save handoff: write the assembled buffer to disk
//!
//! The file only comes into existence after the full buffer was assembled,
//! so a failed export never leaves a partial artifact behind.

use crate::error::{ExportError, ExportResult};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `buffer` to `dir/filename`. When the target already exists the
/// name is collision-avoided with an `HHMMSS` timestamp infix; repeat saves
/// within the same second fall back to a counter. A platform refusal
/// surfaces as `DownloadRejected`; there is no retry.
pub fn save(buffer: &[u8], dir: &Path, filename: &str) -> ExportResult<PathBuf> {
    let mut target = dir.join(filename);

    if target.exists() {
        let stamped = with_suffix(filename, &Local::now().format("%H%M%S").to_string());
        target = dir.join(&stamped);

        let mut attempt = 1u32;
        while target.exists() {
            target = dir.join(with_suffix(&stamped, &attempt.to_string()));
            attempt += 1;
        }
    }

    fs::write(&target, buffer).map_err(|e| {
        ExportError::DownloadRejected(format!("failed to write {}: {}", target.display(), e))
    })?;

    Ok(target)
}

fn with_suffix(filename: &str, suffix: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{suffix}.{ext}"),
        None => format!("{filename}_{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_buffer() {
        let dir = TempDir::new().unwrap();
        let path = save(b"hola", dir.path(), "datos.csv").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hola");
        assert_eq!(path.file_name().unwrap(), "datos.csv");
    }

    #[test]
    fn test_save_avoids_collision() {
        let dir = TempDir::new().unwrap();
        let first = save(b"a", dir.path(), "datos.csv").unwrap();
        let second = save(b"b", dir.path(), "datos.csv").unwrap();
        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"a");
        assert_eq!(fs::read(&second).unwrap(), b"b");
    }

    #[test]
    fn test_save_avoids_collision_within_same_second() {
        let dir = TempDir::new().unwrap();
        // Three rapid saves land inside one HHMMSS stamp; every file must
        // survive with its own contents
        let paths: Vec<_> = (0..3u8)
            .map(|i| save(&[i], dir.path(), "datos.csv").unwrap())
            .collect();

        assert_ne!(paths[0], paths[1]);
        assert_ne!(paths[1], paths[2]);
        assert_ne!(paths[0], paths[2]);
        for (i, path) in paths.iter().enumerate() {
            assert_eq!(fs::read(path).unwrap(), vec![i as u8]);
        }
    }

    #[test]
    fn test_save_into_missing_directory_is_rejected() {
        let result = save(b"x", Path::new("/nonexistent/dir"), "datos.csv");
        assert!(matches!(result, Err(ExportError::DownloadRejected(_))));
    }
}
