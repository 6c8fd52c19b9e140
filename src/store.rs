/// Process-wide store of candidate platform keys.
///
/// Keys are opaque byte strings, typically stored in and loaded from an
/// encrypted container that is unlocked via some other mechanism. Recovery
/// callers work from a snapshot; mutations swap the shared list wholesale,
/// so a snapshot stays stable for as long as a reader holds it.
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::crypto::sensitive::PlatformKey;
use crate::error::SelectKeyError;
use crate::keydata::PlatformKeyId;

static DEFAULT_STORE: Lazy<Arc<PlatformKeyStore>> =
    Lazy::new(|| Arc::new(PlatformKeyStore::new()));

/// Ordered collection of candidate platform keys with snapshot reads.
pub struct PlatformKeyStore {
    keys: RwLock<Arc<Vec<PlatformKey>>>,
}

impl PlatformKeyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Atomically replace the candidate keys.
    pub fn set(&self, keys: Vec<PlatformKey>) {
        let mut guard = self.keys.write().expect("platform key store lock poisoned");
        debug!(count = keys.len(), "platform keys replaced");
        *guard = Arc::new(keys);
    }

    /// Atomically append candidate keys, preserving insertion order.
    pub fn add(&self, keys: Vec<PlatformKey>) {
        let mut guard = self.keys.write().expect("platform key store lock poisoned");
        let mut next = Vec::with_capacity(guard.len() + keys.len());
        next.extend(guard.iter().cloned());
        next.extend(keys);
        debug!(count = next.len(), "platform keys appended");
        *guard = Arc::new(next);
    }

    /// The current keys as a stable snapshot; later mutations do not
    /// affect it.
    pub fn snapshot(&self) -> Arc<Vec<PlatformKey>> {
        Arc::clone(&self.keys.read().expect("platform key store lock poisoned"))
    }

    /// Find the first key whose HMAC over the id's salt matches its digest.
    pub fn select(&self, id: &PlatformKeyId) -> Result<PlatformKey, SelectKeyError> {
        if !id.alg.available() {
            return Err(SelectKeyError::DigestAlgorithmUnavailable);
        }

        let keys = self.snapshot();
        keys.iter()
            .find(|key| id.alg.verify_hmac(key.as_bytes(), &id.salt, &id.digest))
            .cloned()
            .ok_or(SelectKeyError::NoKeyAvailable)
    }
}

impl Default for PlatformKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The store backing [`set_platform_keys`] and [`add_platform_keys`].
pub fn default_store() -> Arc<PlatformKeyStore> {
    Arc::clone(&DEFAULT_STORE)
}

/// Replace the keys this platform uses to recover protected payloads.
pub fn set_platform_keys<I>(keys: I)
where
    I: IntoIterator,
    I::Item: Into<PlatformKey>,
{
    DEFAULT_STORE.set(keys.into_iter().map(Into::into).collect());
}

/// Add keys this platform uses to recover protected payloads, after any
/// already present.
pub fn add_platform_keys<I>(keys: I)
where
    I: IntoIterator,
    I::Item: Into<PlatformKey>,
{
    DEFAULT_STORE.add(keys.into_iter().map(Into::into).collect());
}
