/// Deterministic payload-key derivation.
///
/// The sealing and recovery sides derive the same AES-256 key from a
/// platform key and the per-payload salt carried in the encoded handle.
use hkdf::Hkdf;
use sha2::Sha256;

use crate::crypto::sensitive::AesKey;

/// Fixed HKDF info label shared by the sealing and recovery sides.
const DERIVE_AES_KEY_INFO: &[u8] = b"ENCRYPT";

/// Derive the 32-byte AES-256 payload key from a platform key and salt.
///
/// HKDF-SHA256 with the platform key as input keying material. Collision
/// resistant in both inputs; a different platform key or salt yields an
/// unrelated key.
pub fn derive_aes_key(platform_key: &[u8], salt: &[u8]) -> AesKey {
    let hk = Hkdf::<Sha256>::new(Some(salt), platform_key);
    let mut okm = [0u8; 32];
    hk.expand(DERIVE_AES_KEY_INFO, &mut okm)
        .expect("32 bytes is a valid HKDF-SHA256 output length");
    AesKey::new(okm)
}
