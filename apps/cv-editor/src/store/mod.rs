//! File-backed persistence for the single CV record.

pub mod csv;
pub mod entries;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::models::cv::CvRecord;

pub const DATA_FILE_NAME: &str = "cv_data.csv";

/// Owns the location of the persisted CV file.
///
/// Constructed once at startup and shared through `AppState`. Reads and writes
/// are whole-file and blocking; there is no locking between concurrent savers.
#[derive(Debug, Clone)]
pub struct CvStore {
    path: PathBuf,
}

impl CvStore {
    /// Creates the data directory if needed.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir).with_context(|| {
            format!("Failed to create data directory {}", data_dir.display())
        })?;

        Ok(Self {
            path: data_dir.join(DATA_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current record. A missing or unreadable file yields the
    /// default record.
    pub fn load(&self) -> CvRecord {
        match std::fs::read(&self.path) {
            Ok(bytes) => csv::decode_record(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No CV file at {}, using defaults", self.path.display());
                CvRecord::default()
            }
            Err(e) => {
                warn!("Failed to read CV file {}: {e}", self.path.display());
                CvRecord::default()
            }
        }
    }

    /// Replaces the persisted record. The new content is written to a temp file
    /// next to the target and renamed over it.
    pub fn save(&self, cv: &CvRecord) -> Result<()> {
        let dir = self
            .path
            .parent()
            .context("CV file path has no parent directory")?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(&csv::encode_record(cv))
            .context("Failed to write CV data")?;
        tmp.as_file().sync_all().context("Failed to flush CV data")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        info!("Saved CV to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::DEFAULT_AVATAR;

    #[test]
    fn test_new_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("Data");

        let store = CvStore::new(&data_dir).unwrap();
        assert!(data_dir.is_dir());
        assert_eq!(store.path(), data_dir.join(DATA_FILE_NAME));
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = CvStore::new(dir.path()).unwrap();

        let cv = store.load();
        assert_eq!(cv, CvRecord::default());
        assert_eq!(cv.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CvStore::new(dir.path()).unwrap();
        let cv = CvRecord {
            name: "Lê Minh".into(),
            bio: "Line one\nLine \"two\", end".into(),
            technical_skills: "Rust|Go".into(),
            ..Default::default()
        };

        store.save(&cv).unwrap();
        assert_eq!(store.load(), cv);
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CvStore::new(dir.path()).unwrap();

        store
            .save(&CvRecord {
                name: "First".into(),
                email: "first@example.com".into(),
                ..Default::default()
            })
            .unwrap();
        store
            .save(&CvRecord {
                name: "Second".into(),
                ..Default::default()
            })
            .unwrap();

        let cv = store.load();
        assert_eq!(cv.name, "Second");
        assert_eq!(cv.email, "");
    }

    #[test]
    fn test_saved_file_has_bom_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = CvStore::new(dir.path()).unwrap();
        store.save(&CvRecord::default()).unwrap();

        let bytes = std::fs::read(store.path()).unwrap();
        assert!(bytes.starts_with("\u{feff}Field,Value\n".as_bytes()));
    }

    #[test]
    fn test_load_hand_edited_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CvStore::new(dir.path()).unwrap();
        std::fs::write(
            store.path(),
            "Field,Value\r\nEmail,me@example.com\r\nHoTen,Old\r\nHoTen,New\r\n",
        )
        .unwrap();

        let cv = store.load();
        assert_eq!(cv.name, "New");
        assert_eq!(cv.email, "me@example.com");
        assert_eq!(cv.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn test_load_unreadable_path_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = CvStore::new(dir.path()).unwrap();
        // A directory where the file should be makes the read fail.
        std::fs::create_dir(store.path()).unwrap();

        assert_eq!(store.load(), CvRecord::default());
    }

    #[test]
    fn test_save_into_removed_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("Data");
        let store = CvStore::new(&data_dir).unwrap();
        std::fs::remove_dir(&data_dir).unwrap();

        assert!(store.save(&CvRecord::default()).is_err());
    }
}
