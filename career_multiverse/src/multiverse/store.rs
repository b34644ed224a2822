//! Reality Store
//!
//! Owns the persisted `StudentProfile` aggregate. Every mutation goes through
//! read-entire → modify-in-memory → write-entire; a write persists the full
//! record and then notifies every subscribed observer, which is expected to
//! re-read. Last writer wins.

use super::templates::default_profile;
use super::types::StudentProfile;
use crate::config::StoreConfig;
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================
// STORAGE BACKENDS
// ============================================================

/// A string key-value slot the store serializes into
pub trait ProfileStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// SQLite-backed key-value slots
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Opens (or creates) a file-backed store
    pub fn new(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::init(conn)
    }

    /// Create an in-memory store for testing
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl ProfileStorage for SqliteStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let conn = lock(&self.conn);
        let value = conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let conn = lock(&self.conn);
        conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = lock(&self.conn);
        conn.execute("DELETE FROM kv_slots WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Plain in-process slots; counts writes so tests can assert on them
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    write_count: AtomicU64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::SeqCst)
    }
}

impl ProfileStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.slots).get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.slots).insert(key.to_string(), value.to_string());
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.slots).remove(key);
        Ok(())
    }
}

impl<S: ProfileStorage + ?Sized> ProfileStorage for Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

// ============================================================
// CHANGE NOTIFICATION
// ============================================================

/// Delivered to observers after a write is durable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileChanged {
    /// Number of writes performed by this store so far
    pub revision: u64,
}

/// Receives a notice after every profile write
pub trait ProfileObserver: Send + Sync {
    fn on_profile_changed(&self, event: &ProfileChanged);
}

impl<F> ProfileObserver for F
where
    F: Fn(&ProfileChanged) + Send + Sync,
{
    fn on_profile_changed(&self, event: &ProfileChanged) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// ============================================================
// REALITY STORE
// ============================================================

pub struct RealityStore {
    storage: Box<dyn ProfileStorage>,
    config: StoreConfig,
    observers: Mutex<Vec<(SubscriptionId, Arc<dyn ProfileObserver>)>>,
    next_subscription: AtomicU64,
    revision: AtomicU64,
}

impl RealityStore {
    /// Opens the backend named by the config: a SQLite file, or an in-memory
    /// database when no path is set.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let storage = match &config.db_path {
            Some(path) => {
                log::info!("[store] Opening profile store at {}", path.display());
                SqliteStorage::new(path)?
            }
            None => {
                log::info!("[store] Opening in-memory profile store");
                SqliteStorage::in_memory()?
            }
        };
        Ok(Self::with_storage(storage, config))
    }

    pub fn with_storage(storage: impl ProfileStorage + 'static, config: StoreConfig) -> Self {
        Self {
            storage: Box::new(storage),
            config,
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
            revision: AtomicU64::new(0),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_storage(MemoryStorage::new(), StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Loads the profile, seeding and persisting the demo profile when the
    /// slot is empty.
    pub fn read(&self) -> Result<StudentProfile> {
        match self.storage.load(&self.config.profile_key)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => {
                log::info!("[store] No stored profile, seeding default");
                let profile = default_profile();
                self.write(&profile)?;
                Ok(profile)
            }
        }
    }

    /// Persists the whole aggregate, then notifies observers
    pub fn write(&self, profile: &StudentProfile) -> Result<()> {
        let data = serde_json::to_string(profile)?;
        self.storage.save(&self.config.profile_key, &data)?;
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!(
            "[store] Wrote profile {} ({} realities, revision {})",
            profile.id,
            profile.realities.len(),
            revision
        );

        // Observers may read the store; never call them under the lock.
        let observers: Vec<Arc<dyn ProfileObserver>> = lock(&self.observers)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        let event = ProfileChanged { revision };
        for observer in observers {
            observer.on_profile_changed(&event);
        }
        Ok(())
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self, observer: impl ProfileObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        lock(&self.observers).push((id, Arc::new(observer)));
        id
    }

    /// Returns false when the subscription was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = lock(&self.observers);
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.observers).len()
    }

    // Raw slots, used for the session record

    pub fn load_slot(&self, key: &str) -> Result<Option<String>> {
        self.storage.load(key)
    }

    pub fn save_slot(&self, key: &str, value: &str) -> Result<()> {
        self.storage.save(key, value)
    }

    pub fn remove_slot(&self, key: &str) -> Result<()> {
        self.storage.remove(key)
    }
}
