/// Cryptographic building blocks for the key-protection envelope.
///
/// - HMAC-based platform key selection (`hash`)
/// - HKDF payload-key derivation (`kdf`)
/// - AES-256-GCM sealing and opening with caller-sized nonces (`aead`)
/// - Zeroize-on-drop wrappers for key material (`sensitive`)
pub mod aead;
pub mod hash;
pub mod kdf;
pub mod sensitive;
