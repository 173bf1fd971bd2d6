//! JSON-collection key-value store.
//!
//! Five named collections are held in memory behind one lock and optionally
//! mirrored to `<data_dir>/<collection>.json`. A malformed file is treated as
//! an empty collection (with a warning) rather than a startup failure.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::types::{ContactMessage, Order, Product, SaleRecord, User};
use crate::error::MarketServiceError;

/// The persisted collections. Callers never hold references across
/// mutations; `JsonStore::mutate` hands out a working copy.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub sales: Vec<SaleRecord>,
    pub contacts: Vec<ContactMessage>,
}

pub struct JsonStore {
    data: RwLock<Collections>,
    data_dir: Option<PathBuf>,
}

impl JsonStore {
    /// Open the store. With a data directory, each collection is loaded from
    /// `<dir>/<name>.json`; corrupt or unreadable files degrade to empty.
    pub fn open(data_dir: PathBuf) -> Result<Self, MarketServiceError> {
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("create data dir {}", data_dir.display()))?;
        let data = Collections {
            users: load_collection(&data_dir, "users"),
            products: load_collection(&data_dir, "products"),
            orders: load_collection(&data_dir, "orders"),
            sales: load_collection(&data_dir, "sales"),
            contacts: load_collection(&data_dir, "contacts"),
        };
        Ok(Self {
            data: RwLock::new(data),
            data_dir: Some(data_dir),
        })
    }

    /// Memory-only store. Used when no data directory is configured and in
    /// tests.
    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(Collections::default()),
            data_dir: None,
        }
    }

    /// Consistent read view of all collections.
    pub fn read(&self) -> RwLockReadGuard<'_, Collections> {
        // A panicked mutation never leaves partial state behind (mutations
        // run on a working copy), so a poisoned lock is safe to recover.
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against a working copy of the collections. On `Ok` the copy
    /// is flushed to disk and swapped in; on `Err` (from `f` or the flush)
    /// the shared state is left untouched.
    pub fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Collections) -> Result<T, MarketServiceError>,
    ) -> Result<T, MarketServiceError> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let mut working = guard.clone();
        let out = f(&mut working)?;
        if let Some(dir) = &self.data_dir {
            flush_all(dir, &working)?;
        }
        *guard = working;
        Ok(out)
    }
}

fn load_collection<T: DeserializeOwned>(dir: &Path, name: &str) -> Vec<T> {
    let path = dir.join(format!("{name}.json"));
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(collection = name, error = %e, "unreadable collection, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(collection = name, error = %e, "corrupt collection, starting empty");
            Vec::new()
        }
    }
}

fn flush_all(dir: &Path, data: &Collections) -> Result<(), MarketServiceError> {
    flush_collection(dir, "users", &data.users)?;
    flush_collection(dir, "products", &data.products)?;
    flush_collection(dir, "orders", &data.orders)?;
    flush_collection(dir, "sales", &data.sales)?;
    flush_collection(dir, "contacts", &data.contacts)?;
    Ok(())
}

fn flush_collection<T: Serialize>(
    dir: &Path,
    name: &str,
    records: &[T],
) -> Result<(), MarketServiceError> {
    let bytes = serde_json::to_vec_pretty(records)
        .with_context(|| format!("serialize collection {name}"))?;
    let tmp = dir.join(format!("{name}.json.tmp"));
    let path = dir.join(format!("{name}.json"));
    fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}
