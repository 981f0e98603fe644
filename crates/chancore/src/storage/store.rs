//! File-backed store for the channels/groups document.
//!
//! The document is loaded once, kept in memory behind a mutex and written back
//! in full after every mutation (temp file + rename).

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::core::error::{AppError, AppResult};
use crate::core::metrics;
use crate::storage::document::{Document, EntityKind, EntityRecord};

/// Suffix of the temporary file written before the atomic rename
const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Suffix given to an unreadable data file before it is replaced
const CORRUPT_FILE_SUFFIX: &str = ".corrupt";

/// Thread-safe store over a single JSON document.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    doc: Mutex<Document>,
}

impl Store {
    /// Loads the document from `path`.
    ///
    /// A missing or malformed file is replaced by the empty document, which is
    /// written back immediately. A file that is not valid UTF-8 JSON is first
    /// moved aside to `<file>.corrupt`. Any other read error starts the store
    /// empty and leaves the file untouched. Never fails; write errors are logged.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = match read_document(&path) {
            Ok(Some(doc)) => {
                log::info!(
                    "Loaded {} channel(s), {} group(s) from {}",
                    doc.channels.len(),
                    doc.groups.len(),
                    path.display()
                );
                doc
            }
            Ok(None) => {
                log::warn!("Data file {} not found, creating an empty one", path.display());
                let doc = Document::default();
                persist_logged(&path, &doc);
                doc
            }
            Err(e) if is_unparseable(&e) => {
                log::warn!("Data file {} does not parse ({}), resetting to empty", path.display(), e);
                set_aside_corrupt(&path);
                let doc = Document::default();
                persist_logged(&path, &doc);
                doc
            }
            Err(e) => {
                // Contents may still be intact; leave the file as it is.
                log::error!(
                    "Data file {} could not be read ({}), starting empty without overwriting it",
                    path.display(),
                    e
                );
                Document::default()
            }
        };

        Self {
            path,
            doc: Mutex::new(doc),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts or overwrites `kind[id]` and persists.
    pub fn add(&self, kind: EntityKind, id: impl Into<String>, record: EntityRecord) {
        let id = id.into();
        let mut doc = self.lock();
        doc.entities_mut(kind).insert(id.clone(), record);
        metrics::record_mutation(kind.as_ref(), "add");
        log::info!("Added {} entry {}", kind.singular(), id);
        persist_logged(&self.path, &doc);
    }

    /// Deletes `kind[id]`. Persists and returns true only if it existed.
    pub fn remove(&self, kind: EntityKind, id: &str) -> bool {
        let mut doc = self.lock();
        if doc.entities_mut(kind).remove(id).is_none() {
            return false;
        }
        metrics::record_mutation(kind.as_ref(), "remove");
        log::info!("Removed {} entry {}", kind.singular(), id);
        persist_logged(&self.path, &doc);
        true
    }

    /// Copy of every entity of `kind`.
    pub fn list(&self, kind: EntityKind) -> BTreeMap<String, EntityRecord> {
        self.lock().entities(kind).clone()
    }

    pub fn get(&self, kind: EntityKind, id: &str) -> Option<EntityRecord> {
        self.lock().entities(kind).get(id).cloned()
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.lock().entities(kind).contains_key(id)
    }

    /// Number of registered (channels, groups).
    pub fn counts(&self) -> (usize, usize) {
        let doc = self.lock();
        (doc.channels.len(), doc.groups.len())
    }

    pub fn settings(&self) -> BTreeMap<String, String> {
        self.lock().settings.clone()
    }

    /// Copy of the whole document.
    pub fn snapshot(&self) -> Document {
        self.lock().clone()
    }

    /// Writes the current document, reporting failure to the caller.
    pub fn try_save(&self) -> AppResult<()> {
        let doc = self.lock();
        write_document_atomic(&self.path, &doc)
    }

    fn lock(&self) -> MutexGuard<'_, Document> {
        self.doc.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Reads the document at `path`. `Ok(None)` when the file does not exist.
pub fn read_document(path: &Path) -> AppResult<Option<Document>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let doc: Document = serde_json::from_str(&content)?;
    Ok(Some(doc))
}

/// Serializes `doc` (2-space indent, UTF-8) to a sibling temp file and renames it over `path`.
pub fn write_document_atomic(path: &Path, doc: &Document) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(doc)?;

    let tmp_path = sibling_path(path, TEMP_FILE_SUFFIX);
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(json.as_bytes())?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Bytes that were read but are not a document: bad JSON or bad UTF-8.
fn is_unparseable(err: &AppError) -> bool {
    match err {
        AppError::Json(_) => true,
        AppError::Io(e) => e.kind() == std::io::ErrorKind::InvalidData,
        _ => false,
    }
}

fn persist_logged(path: &Path, doc: &Document) {
    if let Err(e) = write_document_atomic(path, doc) {
        metrics::STORE_SAVE_FAILURES_TOTAL.inc();
        log::error!("Failed to save data file {}: {}", path.display(), e);
    }
}

fn set_aside_corrupt(path: &Path) {
    let target = sibling_path(path, CORRUPT_FILE_SUFFIX);
    match fs::rename(path, &target) {
        Ok(()) => log::warn!("Moved unreadable data file to {}", target.display()),
        Err(e) => log::error!("Failed to move unreadable data file aside: {}", e),
    }
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn data_path(dir: &TempDir) -> PathBuf {
        dir.path().join("channels_data.json")
    }

    #[test]
    fn test_sibling_path_appends_suffix() {
        assert_eq!(
            sibling_path(Path::new("/data/channels_data.json"), ".tmp"),
            PathBuf::from("/data/channels_data.json.tmp")
        );
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);

        write_document_atomic(&path, &Document::default()).unwrap();

        assert!(path.exists());
        assert!(!sibling_path(&path, TEMP_FILE_SUFFIX).exists());
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");

        write_document_atomic(&path, &Document::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_file_is_set_aside() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        fs::write(&path, "{ this is not json").unwrap();

        let store = Store::open(&path);

        assert_eq!(store.snapshot(), Document::default());
        let corrupt = sibling_path(&path, CORRUPT_FILE_SUFFIX);
        assert_eq!(fs::read_to_string(corrupt).unwrap(), "{ this is not json");
    }

    #[test]
    fn test_invalid_utf8_file_is_set_aside() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        let original: &[u8] = b"{\"channels\":{\"c1\":{\"title\":\"\xff\xfe\"}},\"groups\":{},\"settings\":{}}";
        fs::write(&path, original).unwrap();

        let store = Store::open(&path);

        assert_eq!(store.counts(), (0, 0));
        let corrupt = sibling_path(&path, CORRUPT_FILE_SUFFIX);
        assert_eq!(fs::read(corrupt).unwrap(), original);
        assert_eq!(read_document(&path).unwrap(), Some(Document::default()));
    }

    #[test]
    fn test_unreadable_path_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = data_path(&dir);
        // Reading a directory fails with an error other than bad data.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "keep").unwrap();

        let store = Store::open(&path);

        assert_eq!(store.counts(), (0, 0));
        assert!(path.is_dir());
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "keep");
        assert!(!sibling_path(&path, CORRUPT_FILE_SUFFIX).exists());
    }

    #[test]
    fn test_read_document_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_document(&data_path(&dir)).unwrap().is_none());
    }
}
