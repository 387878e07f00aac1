use crate::error::{LppError, LppResult};
use crate::types::{CatalogEntry, ProblemRecord};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// JSON store semantics for id-keyed records.
///
/// - Keys are decimal problem ids, held as `u64` so ordering is numeric
/// - The file is always rewritten in full, sorted by id ascending
/// - Load-then-save with no locking: the last writer wins
pub trait Keyed {
    fn assign_id(&mut self, id: &str);
}

impl Keyed for ProblemRecord {
    fn assign_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl Keyed for CatalogEntry {
    fn assign_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// Parse a store key; leading zeros and surrounding whitespace are tolerated
pub fn parse_id(id: &str) -> Option<u64> {
    id.trim().parse::<u64>().ok()
}

#[derive(Debug, Clone)]
pub struct IdStore<T> {
    path: PathBuf,
    entries: BTreeMap<u64, T>,
}

/// Generated solutions (`metadata.json`)
pub type MetadataStore = IdStore<ProblemRecord>;

/// Upstream problem catalog (`problems.json`)
pub type Catalog = IdStore<CatalogEntry>;

impl<T> IdStore<T>
where
    T: Serialize + DeserializeOwned + Keyed,
{
    /// Load the store; a missing file is an empty store
    pub fn load(path: impl Into<PathBuf>) -> LppResult<Self> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "Store file not found, starting empty");
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| LppError::persistence(&path, format!("read failed: {}", e)))?;
        let raw: HashMap<String, T> = if content.trim().is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str(&content)
                .map_err(|e| LppError::persistence(&path, format!("parse failed: {}", e)))?
        };

        let mut entries = BTreeMap::new();
        for (key, mut record) in raw {
            match parse_id(&key) {
                Some(id) => {
                    record.assign_id(&id.to_string());
                    entries.insert(id, record);
                }
                None => warn!(path = %path.display(), key = %key, "Skipping non-numeric store key"),
            }
        }

        debug!(path = %path.display(), entries = entries.len(), "Loaded store");
        Ok(Self { path, entries })
    }

    /// Rewrite the whole file, sorted by numeric id
    pub fn save(&self) -> LppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| LppError::persistence(&self.path, format!("create dir failed: {}", e)))?;
        }

        let mut json = serde_json::to_string_pretty(&SortedById(&self.entries))
            .map_err(|e| LppError::persistence(&self.path, format!("serialize failed: {}", e)))?;
        json.push('\n');

        fs::write(&self.path, json)
            .map_err(|e| LppError::persistence(&self.path, format!("write failed: {}", e)))?;

        debug!(path = %self.path.display(), entries = self.entries.len(), "Saved store");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        parse_id(id).and_then(|id| self.entries.get(&id))
    }

    /// Insert or wholesale-replace the record for `id`
    pub fn upsert(&mut self, id: &str, mut record: T) -> LppResult<Option<T>> {
        let key = parse_id(id)
            .ok_or_else(|| LppError::persistence(&self.path, format!("invalid problem id '{}'", id)))?;
        record.assign_id(&key.to_string());
        Ok(self.entries.insert(key, record))
    }

    /// Replace every entry (full catalog refresh)
    pub fn replace_all(&mut self, entries: BTreeMap<u64, T>) {
        self.entries = entries
            .into_iter()
            .map(|(id, mut record)| {
                record.assign_id(&id.to_string());
                (id, record)
            })
            .collect();
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &T)> {
        self.entries.iter().map(|(id, record)| (*id, record))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

struct SortedById<'a, T>(&'a BTreeMap<u64, T>);

impl<T: Serialize> Serialize for SortedById<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, record) in self.0 {
            map.serialize_entry(&id.to_string(), record)?;
        }
        map.end()
    }
}
