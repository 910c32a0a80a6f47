use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::key;
use crate::payload::{SnapshotPayload, SnapshotRecord};

/// Attempts before giving up on finding an unused key. With 36^8 keys the
/// bound exists for completeness, not because it is expected to be hit.
const MAX_KEY_ATTEMPTS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    Corrupt(String),
    Io(String),
    Transport(String),
    Service { status: u16, message: String },
    KeySpaceExhausted,
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Corrupt(msg) => write!(f, "snapshot payload corrupt: {msg}"),
            SnapshotError::Io(msg) => write!(f, "snapshot storage error: {msg}"),
            SnapshotError::Transport(msg) => write!(f, "snapshot service unreachable: {msg}"),
            SnapshotError::Service { status, message } => {
                write!(f, "snapshot service error ({status}): {message}")
            }
            SnapshotError::KeySpaceExhausted => {
                write!(f, "could not allocate an unused snapshot key")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Capability interface to a snapshot backing store.
///
/// `store` persists a payload under a fresh opaque key and returns the
/// key; `fetch` returns the record for a key, or `None` for an unknown
/// key (absence is not an error). Snapshots are write-once; no update or
/// delete exists, so keyed records never conflict.
pub trait SnapshotStore {
    fn store(&mut self, payload: SnapshotPayload) -> Result<String, SnapshotError>;
    fn fetch(&self, key: &str) -> Result<Option<SnapshotRecord>, SnapshotError>;
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Volatile store, used in tests and as the session fallback when no
/// persistent backing is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, SnapshotRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn store(&mut self, payload: SnapshotPayload) -> Result<String, SnapshotError> {
        for _ in 0..MAX_KEY_ATTEMPTS {
            let candidate = key::generate_key();
            if self.records.contains_key(&candidate) {
                continue;
            }
            self.records.insert(
                candidate.clone(),
                SnapshotRecord {
                    key: candidate.clone(),
                    payload,
                    created_at_ms: now_ms(),
                },
            );
            return Ok(candidate);
        }
        Err(SnapshotError::KeySpaceExhausted)
    }

    fn fetch(&self, key: &str) -> Result<Option<SnapshotRecord>, SnapshotError> {
        Ok(self.records.get(key).cloned())
    }
}

/// Local-only persistent store: one JSON file per key under a data
/// directory. Reachable only from the machine that wrote it, which is
/// exactly the local variant's contract.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| SnapshotError::Io(e.to_string()))?;
        Ok(Self { root })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl SnapshotStore for DirStore {
    fn store(&mut self, payload: SnapshotPayload) -> Result<String, SnapshotError> {
        for _ in 0..MAX_KEY_ATTEMPTS {
            let candidate = key::generate_key();
            let path = self.record_path(&candidate);
            if path.exists() {
                continue;
            }
            let record = SnapshotRecord {
                key: candidate.clone(),
                payload,
                created_at_ms: now_ms(),
            };
            let raw =
                serde_json::to_string(&record).map_err(|e| SnapshotError::Io(e.to_string()))?;
            fs::write(&path, raw).map_err(|e| SnapshotError::Io(e.to_string()))?;
            return Ok(candidate);
        }
        Err(SnapshotError::KeySpaceExhausted)
    }

    fn fetch(&self, key: &str) -> Result<Option<SnapshotRecord>, SnapshotError> {
        // Keys are file names; never let a malformed one touch the fs.
        if !key::is_well_formed(key) {
            return Ok(None);
        }
        let raw = match fs::read_to_string(self.record_path(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SnapshotError::Io(e.to_string())),
        };
        let record = serde_json::from_str::<SnapshotRecord>(&raw)
            .map_err(|e| SnapshotError::Corrupt(e.to_string()))?;
        Ok(Some(record))
    }
}
