//! The metadata store client.
//!
//! Call order per run: [`MetadataStore::load`], then
//! [`MetadataStore::ensure_entries`] for every identifier in the corpus, then
//! any number of [`MetadataStore::get`], then one [`MetadataStore::commit`] at
//! teardown. Nothing reaches the disk between load and commit.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use drill_core::entities::MetadataRecord;
use drill_core::ids::{PointId, parse_store_key};

use crate::error::StoreError;
use crate::record::{RawRecord, StoredEntry, merge_defaults};

/// Exclusive owner of the metadata document.
#[derive(Debug)]
pub struct MetadataStore {
    path: PathBuf,
    entries: BTreeMap<PointId, StoredEntry>,
}

impl MetadataStore {
    /// Load the store at `path`.
    ///
    /// A missing document is created empty (parent directories included). An
    /// empty or whitespace-only file is read as an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StoreCorrupt`] if the document cannot be parsed,
    /// has a key that is not a canonical identifier, or has a record with more
    /// successes than attempts. The file is left untouched in that case.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if !path.exists() {
            tracing::warn!(path = %path.display(), "metadata store not found; creating an empty one");
            let store = Self {
                path,
                entries: BTreeMap::new(),
            };
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
            store.write_document(&store.entries)?;
            return Ok(store);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let entries = parse_document(&path, &content)?;
        tracing::debug!(path = %path.display(), records = entries.len(), "loaded metadata store");

        let pending = pending_path(&path);
        if pending.exists() {
            tracing::warn!(
                path = %pending.display(),
                "found outcomes from a session whose commit failed; they are not applied automatically"
            );
        }

        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers that have a record.
    #[must_use]
    pub fn ids(&self) -> BTreeSet<PointId> {
        self.entries.keys().copied().collect()
    }

    /// Register identifiers, inserting a zeroed record for each one without a
    /// record. Existing records are never touched.
    ///
    /// Returns how many records were inserted.
    pub fn ensure_entries(&mut self, ids: impl IntoIterator<Item = PointId>) -> usize {
        let mut inserted = 0;
        for id in ids {
            self.entries.entry(id).or_insert_with(|| {
                inserted += 1;
                StoredEntry::new(MetadataRecord::default())
            });
        }
        if inserted > 0 {
            tracing::info!(inserted, "registered new points in metadata store");
        }
        inserted
    }

    /// The record for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownPoint`] if `id` has no record.
    pub fn get(&self, id: PointId) -> Result<MetadataRecord, StoreError> {
        self.entries
            .get(&id)
            .map(|entry| entry.record)
            .ok_or_else(|| self.unknown(id))
    }

    /// Replace the records in `updates` and write the whole document once.
    ///
    /// The in-memory store only changes after the write succeeds, so a failed
    /// commit can be retried with the same updates.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownPoint`] for an update to an unregistered
    /// identifier and [`StoreError::Io`] if the document cannot be written.
    pub fn commit(&mut self, updates: &BTreeMap<PointId, MetadataRecord>) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        for (id, record) in updates {
            let entry = next.get_mut(id).ok_or_else(|| self.unknown(*id))?;
            entry.record = *record;
        }

        self.write_document(&next)?;
        self.entries = next;
        tracing::info!(
            path = %self.path.display(),
            updated = updates.len(),
            records = self.entries.len(),
            "committed metadata store"
        );
        Ok(())
    }

    /// Save session outcomes that could not be committed next to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the recovery file cannot be written.
    pub fn write_pending(
        &self,
        updates: &BTreeMap<PointId, MetadataRecord>,
    ) -> Result<PathBuf, StoreError> {
        let path = pending_path(&self.path);
        let content = serde_json::to_string_pretty(updates)?;
        std::fs::write(&path, content).map_err(|e| StoreError::io(&path, e))?;
        Ok(path)
    }

    fn unknown(&self, id: PointId) -> StoreError {
        StoreError::UnknownPoint {
            id,
            path: self.path.clone(),
        }
    }

    fn write_document(&self, entries: &BTreeMap<PointId, StoredEntry>) -> Result<(), StoreError> {
        let document: BTreeMap<PointId, RawRecord> = entries
            .iter()
            .map(|(id, entry)| (*id, entry.to_raw()))
            .collect();
        let mut content = serde_json::to_string_pretty(&document)?;
        content.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| StoreError::io(temp.path(), e))?;

        if let Ok(metadata) = std::fs::metadata(&self.path) {
            std::fs::set_permissions(temp.path(), metadata.permissions())
                .map_err(|e| StoreError::io(temp.path(), e))?;
        }

        temp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        Ok(())
    }
}

/// Recovery file for outcomes whose commit failed.
#[must_use]
pub fn pending_path(store: &Path) -> PathBuf {
    let mut name = store.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".pending.json");
    store.with_file_name(name)
}

fn parse_document(path: &Path, content: &str) -> Result<BTreeMap<PointId, StoredEntry>, StoreError> {
    if content.trim().is_empty() {
        tracing::warn!(path = %path.display(), "metadata store is empty; treating it as no records");
        return Ok(BTreeMap::new());
    }

    let corrupt = |reason: String| StoreError::StoreCorrupt {
        path: path.to_path_buf(),
        reason,
    };

    let raw: BTreeMap<String, RawRecord> =
        serde_json::from_str(content).map_err(|e| corrupt(e.to_string()))?;

    let mut entries = BTreeMap::new();
    for (key, record) in raw {
        let id = parse_store_key(&key)
            .ok_or_else(|| corrupt(format!("key '{key}' is not a point identifier")))?;
        let entry = merge_defaults(record).map_err(|reason| corrupt(format!("point {id}: {reason}")))?;
        entries.insert(id, entry);
    }
    Ok(entries)
}
