//! JSON snapshot files
//!
//! Reads treat a missing file as "nothing saved yet". Writes go to a sibling
//! `<name>.tmp` file that is synced and then renamed over the target, so a
//! crash leaves either the old or the new contents on disk.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::trace;

use crate::error::LedgerError;

fn storage_error<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> LedgerError + 'a {
    move |e| LedgerError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Sibling temp path, e.g. `ledger.json` -> `ledger.json.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Deserialize `path`, or `T::default()` when the file does not exist
pub fn read_json<T, P>(path: P) -> Result<T, LedgerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!(path = %path.display(), "no file, using default");
            return Ok(T::default());
        }
        Err(e) => return Err(storage_error("read", path)(e)),
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| LedgerError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Serialize `data` to `path` through a synced temp file and a rename
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(storage_error("create directory", parent))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_synced(&temp_path, data)
        .and_then(|()| fs::rename(&temp_path, path).map_err(storage_error("replace", path)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        trace!(path = %path.display(), "wrote file");
    }
    result
}

fn write_synced<T: Serialize>(path: &Path, data: &T) -> Result<(), LedgerError> {
    let file = File::create(path).map_err(storage_error("create", path))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| LedgerError::Storage(format!("Failed to serialize {}: {}", path.display(), e)))?;
    writer.flush().map_err(storage_error("flush", path))?;
    writer.get_ref().sync_all().map_err(storage_error("sync", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Sample {
        title: String,
        count: u32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Sample = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Sample::default());
    }

    #[test]
    fn test_write_then_read_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("ledger.json");
        let data = Sample {
            title: "Lunch".into(),
            count: 2,
        };

        write_json_atomic(&path, &data).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join("ledger.json.tmp").exists());
        assert_eq!(read_json::<Sample, _>(&path).unwrap(), data);
    }

    #[test]
    fn test_temp_path_keeps_full_name() {
        assert_eq!(
            temp_path_for(Path::new("/data/ledger.json")),
            PathBuf::from("/data/ledger.json.tmp")
        );
        assert_eq!(
            temp_path_for(Path::new("/data/ledger")),
            PathBuf::from("/data/ledger.tmp")
        );
    }

    #[test]
    fn test_failed_write_leaves_target_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::write(&path, "old").unwrap();

        // The target is a directory now, so the rename cannot succeed
        let blocked = temp_dir.path().join("blocked");
        fs::create_dir_all(blocked.join("inner")).unwrap();
        let sample = Sample::default();
        assert!(write_json_atomic(&blocked, &sample).is_err());
        assert!(!temp_dir.path().join("blocked.tmp").exists());

        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn test_read_invalid_json_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<Sample, _>(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
    }
}
