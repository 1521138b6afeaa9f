//! Owned-app cache
//!
//! Lookup order without a refresh: memory, then the persisted store entry,
//! then the remote source. A refresh goes straight to the remote source.
//! Remote failures degrade to an empty set and leave the cache empty so the
//! next load tries again.

use crate::store::{KeyValueStore, codec};
use hb_client::OwnedAppsSource;
use std::collections::HashSet;

/// Store key holding the compressed owned-id list
pub const OWNED_APPS_KEY: &str = "hb-key-exporter-ownedApps";

/// Set of platform ids (packages and apps) the account owns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedApps {
    ids: HashSet<u64>,
}

impl OwnedApps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sorted ids, the persisted form
    pub fn to_sorted_vec(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<u64> for OwnedApps {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Where the cached set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheState {
    #[default]
    Empty,
    FromStore,
    FromRemote,
}

/// Explicit replacement for a process-wide owned-apps global
#[derive(Debug, Clone, Default)]
pub struct OwnershipCache {
    state: CacheState,
    apps: OwnedApps,
}

impl OwnershipCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    pub fn apps(&self) -> &OwnedApps {
        &self.apps
    }

    /// Drop the in-memory copy; the persisted entry is left alone
    pub fn invalidate(&mut self) {
        self.state = CacheState::Empty;
        self.apps = OwnedApps::new();
    }

    /// Resolve the owned set, consulting the store and source as needed
    pub async fn load<S, F>(&mut self, store: &mut S, source: &F, refresh: bool) -> &OwnedApps
    where
        S: KeyValueStore + ?Sized,
        F: OwnedAppsSource + ?Sized,
    {
        if refresh {
            self.invalidate();
        } else if self.state != CacheState::Empty {
            tracing::debug!("Using cached owned apps");
            return &self.apps;
        } else if let Some(apps) = Self::read_store(store) {
            tracing::debug!(count = apps.len(), "Using stored owned apps");
            self.apps = apps;
            self.state = CacheState::FromStore;
            return &self.apps;
        }

        tracing::debug!("Fetching owned apps");
        match source.owned_apps().await {
            Ok(ids) => {
                self.apps = ids.into_iter().collect();
                self.state = CacheState::FromRemote;
                Self::persist(store, &self.apps);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Owned apps fetch failed, continuing without ownership data");
                self.invalidate();
            }
        }
        &self.apps
    }

    fn read_store<S: KeyValueStore + ?Sized>(store: &S) -> Option<OwnedApps> {
        let payload = store.get(OWNED_APPS_KEY)?;
        match codec::decompress_json::<Vec<u64>>(&payload) {
            Ok(ids) => Some(ids.into_iter().collect()),
            Err(reason) => {
                tracing::warn!(%reason, "Ignoring unreadable owned apps entry");
                None
            }
        }
    }

    fn persist<S: KeyValueStore + ?Sized>(store: &mut S, apps: &OwnedApps) {
        let result = codec::compress_json(&apps.to_sorted_vec())
            .map_err(|e| e.to_string())
            .and_then(|payload| store.set(OWNED_APPS_KEY, payload).map_err(|e| e.to_string()));
        if let Err(reason) = result {
            tracing::warn!(%reason, "Failed to persist owned apps");
        }
    }
}
