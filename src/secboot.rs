/// Contract with the secure-boot key-management framework.
///
/// The framework registers platform handlers by name and dispatches
/// unlock-time recovery calls to them. Everything here mirrors that
/// dispatch surface: the per-payload parameters, the handler trait, the
/// error kinds the framework understands, and the process-wide registry.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::crypto::hash::HashAlg;

/// How the protected payload is authorized at unlock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// No additional authorization.
    None,
    /// A user passphrase gates recovery.
    Passphrase,
}

impl AuthMode {
    /// Stable on-wire value bound into the authenticated context.
    pub fn id(self) -> u8 {
        match self {
            AuthMode::None => 0,
            AuthMode::Passphrase => 1,
        }
    }
}

/// Per-payload parameters the framework hands to a platform handler.
#[derive(Debug, Clone)]
pub struct PlatformKeyData {
    /// Opaque handler-specific handle identifying the protecting key.
    pub encoded_handle: Vec<u8>,
    /// Key-data generation recorded when the payload was sealed.
    pub generation: u32,
    /// KDF algorithm recorded when the payload was sealed.
    pub kdf_alg: HashAlg,
    /// Authorization mode recorded when the payload was sealed.
    pub auth_mode: AuthMode,
}

/// Error surfaced by a platform handler to the framework.
#[derive(Error, Debug)]
pub enum PlatformHandlerError {
    /// Failure attributable to malformed or unrecognisable key data. The
    /// framework may try another handler or report the message as-is.
    #[error("{0}")]
    InvalidData(String),

    /// The handler does not implement the requested operation.
    #[error("unsupported action")]
    UnsupportedAction,

    /// Internal failure unrelated to the supplied key data.
    #[error("{0}")]
    Internal(String),
}

/// A platform's key-data handler, dispatched by registered name.
pub trait PlatformKeyDataHandler: Send + Sync {
    /// Recover the plaintext payload from `encrypted_payload`.
    fn recover_keys(
        &self,
        data: &PlatformKeyData,
        encrypted_payload: &[u8],
    ) -> Result<Vec<u8>, PlatformHandlerError>;

    /// Recover using a caller-supplied auth key, for platforms that bind
    /// payloads to one.
    fn recover_keys_with_auth_key(
        &self,
        data: &PlatformKeyData,
        encrypted_payload: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, PlatformHandlerError>;

    /// Re-protect the payload under a new auth key.
    fn change_auth_key(
        &self,
        data: &PlatformKeyData,
        old: &[u8],
        new: &[u8],
    ) -> Result<Vec<u8>, PlatformHandlerError>;
}

static HANDLERS: Lazy<RwLock<HashMap<&'static str, Arc<dyn PlatformKeyDataHandler>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register `handler` under `name`, replacing any previous registration.
pub fn register_platform_key_data_handler(
    name: &'static str,
    handler: Arc<dyn PlatformKeyDataHandler>,
) {
    HANDLERS
        .write()
        .expect("handler registry lock poisoned")
        .insert(name, handler);
}

/// Look up the handler registered under `name`.
pub fn platform_key_data_handler(name: &str) -> Option<Arc<dyn PlatformKeyDataHandler>> {
    HANDLERS
        .read()
        .expect("handler registry lock poisoned")
        .get(name)
        .cloned()
}
