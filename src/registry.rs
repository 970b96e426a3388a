//! Name-keyed store instances.
//!
//! A [`StoreRegistry`] hands out exactly one instance per store id. Build one
//! at the composition root and pass it around, or reach for
//! [`StoreRegistry::global`] when threading it through is not practical.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::errors::StoreError;
use crate::stores::author_key_store::AuthorKeyStore;
use crate::stores::profile_store::ProfileStore;
use crate::stores::Store;


static GLOBAL: Lazy<StoreRegistry> = Lazy::new(StoreRegistry::new);

/// A store state decoded by [`StoreEntry::parse_state`], not yet applied.
pub type PendingState = Box<dyn Any + Send>;

/// Type-erased view of a registered store.
pub trait StoreEntry: Send + Sync {
    fn store_id(&self) -> &'static str;
    fn state_json(&self) -> Result<Value, StoreError>;
    /// Decodes `state` without touching the store.
    fn parse_state(&self, state: Value) -> Result<PendingState, StoreError>;
    /// Replaces the store's state with a value from [`StoreEntry::parse_state`].
    fn apply_state(&self, state: PendingState) -> Result<(), StoreError>;
    fn reset_state(&self);
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<S: Store> StoreEntry for S {
    fn store_id(&self) -> &'static str {
        S::ID
    }

    fn state_json(&self) -> Result<Value, StoreError> {
        Ok(serde_json::to_value(self.state())?)
    }

    fn parse_state(&self, state: Value) -> Result<PendingState, StoreError> {
        let state: S::State = serde_json::from_value(state)?;
        Ok(Box::new(state))
    }

    fn apply_state(&self, state: PendingState) -> Result<(), StoreError> {
        let state = state
            .downcast::<S::State>()
            .map_err(|_| StoreError::StoreTypeConflict(S::ID.to_string()))?;
        self.replace_state(*state);
        Ok(())
    }

    fn reset_state(&self) {
        self.reset()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

#[derive(Default)]
pub struct StoreRegistry {
    stores: Mutex<HashMap<&'static str, Arc<dyn StoreEntry>>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static StoreRegistry {
        &GLOBAL
    }

    /// Returns the instance registered under `S::ID`, creating it on first use.
    pub fn use_store<S: Store>(&self) -> Result<Arc<S>, StoreError> {
        let entry = {
            let mut stores = self.lock();
            stores
                .entry(S::ID)
                .or_insert_with(|| {
                    log::debug!("Creating store {}", S::ID);
                    let store: Arc<dyn StoreEntry> = Arc::new(S::create());
                    store
                })
                .clone()
        };
        downcast::<S>(entry)
    }

    /// Installs a pre-built store. Fails if its id is already taken.
    pub fn register<S: Store>(&self, store: S) -> Result<Arc<S>, StoreError> {
        let mut stores = self.lock();
        if stores.contains_key(S::ID) {
            return Err(StoreError::AlreadyRegistered(S::ID.to_string()));
        }
        let store = Arc::new(store);
        stores.insert(S::ID, store.clone());
        log::debug!("Registered store {}", S::ID);
        Ok(store)
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn StoreEntry>> {
        self.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Every registered store's state, keyed by store id.
    pub fn state(&self) -> Result<Value, StoreError> {
        let mut map = Map::new();
        for entry in self.entries() {
            map.insert(entry.store_id().to_string(), entry.state_json()?);
        }
        Ok(Value::Object(map))
    }

    /// Replaces the state of each store named in `state`.
    ///
    /// Every id is resolved and every state decoded before any store is
    /// touched, so a failure leaves the registry as it was.
    pub fn hydrate(&self, state: &Value) -> Result<(), StoreError> {
        let object = match state {
            Value::Object(object) => object,
            other => {
                return Err(StoreError::Serialization(serde::de::Error::custom(format!(
                    "expected an object of store states, got {other}"
                ))))
            }
        };

        let targets = object
            .iter()
            .map(|(id, value)| {
                let entry = self
                    .get(id)
                    .ok_or_else(|| StoreError::UnknownStore(id.clone()))?;
                let pending = entry.parse_state(value.clone())?;
                Ok((entry, pending))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        for (entry, pending) in targets {
            log::info!("Hydrating store {}", entry.store_id());
            entry.apply_state(pending)?;
        }
        Ok(())
    }

    pub fn reset_all(&self) {
        for entry in self.entries() {
            log::info!("Resetting store {}", entry.store_id());
            entry.reset_state();
        }
    }

    // Snapshot of the entries so store locks are never taken under the map lock.
    fn entries(&self) -> Vec<Arc<dyn StoreEntry>> {
        let mut entries: Vec<_> = self.lock().values().cloned().collect();
        entries.sort_unstable_by_key(|entry| entry.store_id());
        entries
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<&'static str, Arc<dyn StoreEntry>>> {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn downcast<S: Store>(entry: Arc<dyn StoreEntry>) -> Result<Arc<S>, StoreError> {
    entry
        .into_any()
        .downcast::<S>()
        .map_err(|_| StoreError::StoreTypeConflict(S::ID.to_string()))
}

pub fn use_author_key_store() -> Result<Arc<AuthorKeyStore>, StoreError> {
    StoreRegistry::global().use_store::<AuthorKeyStore>()
}

pub fn use_profile_store() -> Result<Arc<ProfileStore>, StoreError> {
    StoreRegistry::global().use_store::<ProfileStore>()
}
