// WHY: Whole-file JSON persistence for resolved pitch entries
// The store is small and writes are rare, so every mutation rewrites the file in full

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::PitchEntry;
use crate::error::StoreError;

/// Key → entry map, optionally backed by a file
#[derive(Debug, Default)]
pub struct PitchStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, PitchEntry>,
    writes: u64,
}

impl PitchStore {
    /// Store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the store at `path`; a missing file is an empty store.
    ///
    /// Records that cannot be read are skipped. Whenever anything is skipped the
    /// file is first copied to `<name>.bak`, so the next rewrite never destroys
    /// the only copy; if that copy fails the store refuses to open.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No pitch store at {}, starting empty", path.display());
                return Ok(Self {
                    path: Some(path),
                    ..Self::default()
                });
            }
            Err(e) => return Err(e.into()),
        };

        let (entries, skipped) = parse_entries(&content);
        if skipped > 0 {
            let backup = backup_path(&path);
            fs::copy(&path, &backup)?;
            warn!(
                "Skipped {} unreadable records in {}, original saved to {}",
                skipped,
                path.display(),
                backup.display()
            );
        }

        info!("Opened pitch store {} with {} entries", path.display(), entries.len());
        Ok(Self {
            path: Some(path),
            entries,
            writes: 0,
        })
    }

    pub fn get(&self, key: &str) -> Option<&PitchEntry> {
        self.entries.get(key)
    }

    /// Overwrite `key` in memory, then rewrite the backing file.
    ///
    /// The in-memory entry is kept even when the rewrite fails.
    pub fn insert(&mut self, key: &str, entry: PitchEntry) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), entry);
        self.save()
    }

    /// Rewrite the backing file from the in-memory map
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.writes += 1;
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(&self.entries)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;

        debug!("Rewrote pitch store {} ({} entries)", path.display(), self.entries.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of full rewrites performed since the store was opened
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Parse a store document record by record; returns the readable entries and
/// how many records (or the whole document, counted as one) were unreadable
fn parse_entries(content: &str) -> (BTreeMap<String, PitchEntry>, usize) {
    let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Pitch store is not a JSON object: {}", e);
            return (BTreeMap::new(), 1);
        }
    };

    let mut entries = BTreeMap::new();
    let mut skipped = 0;
    for (key, value) in raw {
        match serde_json::from_value::<PitchEntry>(value) {
            Ok(entry) => {
                entries.insert(key, entry);
            }
            Err(e) => {
                warn!("Skipping unreadable pitch record {:?}: {}", key, e);
                skipped += 1;
            }
        }
    }
    (entries, skipped)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}
