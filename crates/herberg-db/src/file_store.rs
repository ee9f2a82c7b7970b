use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use herberg_core::{record_id, DataStore, EntityKind, Record, StoreError};

/// The sole source of truth is one JSON file: a mapping from entity-type name
/// to an ordered list of flat records.
type Snapshot = BTreeMap<String, Vec<Record>>;

/// Flat-file implementation of [`DataStore`].
///
/// Every mutation rewrites the whole snapshot through a temp file followed by
/// an atomic rename, so concurrent in-process readers never observe a
/// partially-written file. There is no write-ahead log: a crash between the
/// in-memory mutation and the rename loses at most that one mutation, never
/// earlier data.
///
/// Mutations hold the write lock across both the map edit and the flush, so
/// one mutation's flush fully completes before the next begins. Reads share
/// the read lock.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: RwLock<Snapshot>,
}

impl FileStore {
    /// Load the store from `path`. An absent file is a first run and yields
    /// an empty store; a present but unparseable file is an error, since
    /// silently discarding data is the worse failure mode.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No data file at {}, starting empty", path.display());
                Snapshot::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the full snapshot and atomically replace the data file.
    /// Called with the write lock held; on failure the in-memory state is
    /// ahead of disk until a later flush succeeds.
    fn flush(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let tmp = {
            let mut os = self.path.as_os_str().to_owned();
            os.push(".tmp");
            PathBuf::from(os)
        };

        let mut file = File::create(&tmp)?;
        file.write_all(&serde_json::to_vec(snapshot)?)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl DataStore for FileStore {
    fn save(&self, kind: EntityKind, record: Record) -> Result<(), StoreError> {
        if record_id(&record).is_none() {
            return Err(StoreError::MissingId(kind));
        }
        let mut records = self.records.write().unwrap();
        records.entry(kind.as_str().to_string()).or_default().push(record);
        self.flush(&records)
    }

    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Record>, StoreError> {
        let records = self.records.read().unwrap();
        Ok(records
            .get(kind.as_str())
            .and_then(|seq| seq.iter().find(|r| record_id(r) == Some(id)))
            .cloned())
    }

    fn update(&self, kind: EntityKind, record: Record) -> Result<(), StoreError> {
        let id = record_id(&record)
            .ok_or(StoreError::MissingId(kind))?
            .to_string();
        let mut records = self.records.write().unwrap();
        let slot = records
            .get_mut(kind.as_str())
            .and_then(|seq| seq.iter_mut().find(|r| record_id(r) == Some(&id)));
        match slot {
            Some(slot) => *slot = record,
            None => return Err(StoreError::NotFound { kind, id }),
        }
        self.flush(&records)
    }

    fn delete(&self, kind: EntityKind, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap();
        let not_found = || StoreError::NotFound {
            kind,
            id: id.to_string(),
        };
        let seq = records.get_mut(kind.as_str()).ok_or_else(not_found)?;
        let pos = seq
            .iter()
            .position(|r| record_id(r) == Some(id))
            .ok_or_else(not_found)?;
        seq.remove(pos);
        self.flush(&records)
    }

    fn list(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
        let records = self.records.read().unwrap();
        Ok(records.get(kind.as_str()).cloned().unwrap_or_default())
    }
}
