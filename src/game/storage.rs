use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::trace;

pub const STATS_KEY: &str = "puzzleMasterStats";
pub const SETTINGS_KEY: &str = "puzzleMasterSettings";

/// Key-value persistence capability. The engine never touches the
/// filesystem directly; the shell decides where blobs live.
pub trait Storage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, blob: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key under an injected data directory.
#[derive(Debug)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn save(&mut self, key: &str, blob: &str) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        trace!(target: "storage", "Writing {} bytes to {:?}", blob.len(), self.key_path(key));
        fs::write(self.key_path(key), blob)
    }
}

/// In-memory store for tests and ephemeral shells.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, blob: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
