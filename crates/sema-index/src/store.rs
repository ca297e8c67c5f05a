//! Durable `id -> (text, embedding)` mapping with a write-through JSON snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

/// One stored chunk with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Flat vector store: the whole mapping lives in memory and is mirrored to a
/// single snapshot file on every mutation.
///
/// All mutation is serialized behind one writer lock; readers observe either
/// the pre- or post-update mapping, never a partial one. The snapshot is
/// replaced atomically (temp file + rename), so the previous snapshot stays
/// loadable if the process dies mid-write.
///
/// The backing map is ordered by id, which makes iteration — and the
/// retriever's tie-breaking — deterministic.
pub struct VectorStore {
    path: PathBuf,
    records: RwLock<BTreeMap<String, VectorRecord>>,
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl VectorStore {
    /// Open a store backed by the snapshot at `path`, creating parent
    /// directories as needed. A missing snapshot means an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read or parsed,
    /// or if it holds records of inconsistent dimensionality.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let records = if path.exists() {
            let bytes = fs::read(&path)?;
            let records: BTreeMap<String, VectorRecord> = serde_json::from_slice(&bytes)?;
            check_dimensions(&records)?;
            records
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            records = records.len(),
            path = %path.display(),
            "vector store opened"
        );

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Insert or overwrite the record at `id`, persisting the full mapping
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `embedding` disagrees with the store's
    /// dimensionality, or a persistence error if the snapshot write fails —
    /// in which case the in-memory mapping is rolled back to its pre-call
    /// state so memory and disk never diverge.
    pub fn put(&self, id: &str, text: &str, embedding: Vec<f32>) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| IndexError::Other(e.to_string()))?;

        if let Some(expected) = records.values().next().map(|r| r.embedding.len())
            && embedding.len() != expected
        {
            return Err(IndexError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            });
        }

        let previous = records.insert(
            id.to_owned(),
            VectorRecord {
                text: text.to_owned(),
                embedding,
            },
        );

        if let Err(e) = self.persist(&records) {
            tracing::warn!("snapshot write failed, rolling back {id}: {e}");
            match previous {
                Some(prev) => records.insert(id.to_owned(), prev),
                None => records.remove(id),
            };
            return Err(e);
        }

        Ok(())
    }

    /// Read-only snapshot of the complete mapping.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store lock is poisoned.
    pub fn all(&self) -> Result<BTreeMap<String, VectorRecord>> {
        Ok(self
            .records
            .read()
            .map_err(|e| IndexError::Other(e.to_string()))?
            .clone())
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self
            .records
            .read()
            .map_err(|e| IndexError::Other(e.to_string()))?
            .len())
    }

    /// # Errors
    ///
    /// Returns an error only if the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Embedding dimensionality, `None` while the store is empty.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store lock is poisoned.
    pub fn dimension(&self) -> Result<Option<usize>> {
        Ok(self
            .records
            .read()
            .map_err(|e| IndexError::Other(e.to_string()))?
            .values()
            .next()
            .map(|r| r.embedding.len()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &BTreeMap<String, VectorRecord>) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(records)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn check_dimensions(records: &BTreeMap<String, VectorRecord>) -> Result<()> {
    let Some(expected) = records.values().next().map(|r| r.embedding.len()) else {
        return Ok(());
    };
    for record in records.values() {
        if record.embedding.len() != expected {
            return Err(IndexError::DimensionMismatch {
                expected,
                actual: record.embedding.len(),
            });
        }
    }
    Ok(())
}
