/// Wire models for the encoded handle and the authenticated context.
///
/// The handle is the JSON document that accompanies each protected payload
/// and identifies the platform key plus the nonce material. The additional
/// data is the DER record bound into the AEAD; its encoding must be
/// byte-identical between the sealing and recovery sides.
use der::{Encode, Sequence};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

use crate::crypto::hash::HashAlg;
use crate::secboot::AuthMode;

/// Leading bytes of the handle nonce consumed as the KDF salt; the
/// remainder is the AEAD nonce. Shared with the sealing side.
pub const SYM_KEY_SALT_LEN: usize = 16;

/// Content-addressed identifier of the platform key protecting a payload.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformKeyId {
    /// Digest algorithm for the selection HMAC.
    pub alg: HashAlg,
    /// Salt the selection HMAC is computed over.
    #[serde_as(as = "Base64")]
    pub salt: Vec<u8>,
    /// Expected HMAC of the salt under the wanted platform key.
    #[serde_as(as = "Base64")]
    pub digest: Vec<u8>,
}

/// The decoded handle supplied by the framework with each payload.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyData {
    /// Format version, carried through into the authenticated context.
    pub version: u32,
    /// Which platform key this payload was sealed under.
    #[serde(rename = "platformKeyID")]
    pub platform_key_id: PlatformKeyId,
    /// KDF salt prefix followed by the AEAD nonce.
    #[serde_as(as = "Base64")]
    pub nonce: Vec<u8>,
}

/// Authenticated-but-unencrypted context bound into every payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub struct AdditionalData {
    version: u32,
    generation: u32,
    kdf_alg: u16,
    auth_mode: u8,
}

impl AdditionalData {
    pub fn new(version: u32, generation: u32, kdf_alg: HashAlg, auth_mode: AuthMode) -> Self {
        Self {
            version,
            generation,
            kdf_alg: kdf_alg.id(),
            auth_mode: auth_mode.id(),
        }
    }

    /// Canonical DER bytes used as the AEAD associated data.
    pub fn to_bytes(&self) -> der::Result<Vec<u8>> {
        self.to_der()
    }
}
