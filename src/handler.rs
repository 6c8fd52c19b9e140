/// The plainkey platform handler.
///
/// Payloads are protected by an AES-256-GCM envelope keyed from one of the
/// runtime-provided platform keys. The encoded handle names the protecting
/// key by an HMAC over a salt and carries the KDF salt and AEAD nonce; the
/// version, generation, KDF algorithm, and auth mode are bound into the
/// envelope as DER-encoded associated data.
use std::sync::{Arc, Once};

use tracing::debug;

use crate::crypto::{aead, kdf};
use crate::error::{Error, Result};
use crate::keydata::{AdditionalData, KeyData, SYM_KEY_SALT_LEN};
use crate::secboot::{self, PlatformHandlerError, PlatformKeyData, PlatformKeyDataHandler};
use crate::store::{default_store, PlatformKeyStore};

/// Name this platform registers under with the secure-boot framework.
pub const PLATFORM_NAME: &str = "plainkey";

static REGISTER: Once = Once::new();

/// Handler that recovers payloads using keys from a platform key store.
pub struct PlainkeyHandler {
    store: Arc<PlatformKeyStore>,
}

impl PlainkeyHandler {
    /// Create a handler that selects keys from `store`.
    pub fn new(store: Arc<PlatformKeyStore>) -> Self {
        Self { store }
    }

    fn recover(&self, data: &PlatformKeyData, encrypted_payload: &[u8]) -> Result<Vec<u8>> {
        let kd: KeyData = serde_json::from_slice(&data.encoded_handle)?;
        if kd.nonce.len() < SYM_KEY_SALT_LEN {
            return Err(Error::InvalidNonceSize);
        }

        debug!(
            version = kd.version,
            generation = data.generation,
            alg = kd.platform_key_id.alg.id(),
            "recovering protected payload"
        );

        let aad = AdditionalData::new(kd.version, data.generation, data.kdf_alg, data.auth_mode);
        let aad_bytes = aad.to_bytes()?;

        let platform_key = self.store.select(&kd.platform_key_id)?;

        let (salt, nonce) = kd.nonce.split_at(SYM_KEY_SALT_LEN);
        let aes_key = kdf::derive_aes_key(platform_key.as_bytes(), salt);
        aead::open(&aes_key, nonce, encrypted_payload, &aad_bytes)
    }
}

impl PlatformKeyDataHandler for PlainkeyHandler {
    fn recover_keys(
        &self,
        data: &PlatformKeyData,
        encrypted_payload: &[u8],
    ) -> std::result::Result<Vec<u8>, PlatformHandlerError> {
        Ok(self.recover(data, encrypted_payload)?)
    }

    fn recover_keys_with_auth_key(
        &self,
        _data: &PlatformKeyData,
        _encrypted_payload: &[u8],
        _key: &[u8],
    ) -> std::result::Result<Vec<u8>, PlatformHandlerError> {
        Err(PlatformHandlerError::UnsupportedAction)
    }

    fn change_auth_key(
        &self,
        _data: &PlatformKeyData,
        _old: &[u8],
        _new: &[u8],
    ) -> std::result::Result<Vec<u8>, PlatformHandlerError> {
        Err(PlatformHandlerError::UnsupportedAction)
    }
}

/// Register the plainkey handler with the secure-boot framework.
///
/// Callable any number of times; registration happens exactly once per
/// process, backed by the default platform key store.
pub fn register() {
    REGISTER.call_once(|| {
        secboot::register_platform_key_data_handler(
            PLATFORM_NAME,
            Arc::new(PlainkeyHandler::new(default_store())),
        );
        debug!(platform = PLATFORM_NAME, "platform key data handler registered");
    });
}
