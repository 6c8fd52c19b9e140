/// Digest algorithm registry for platform key selection.
///
/// Algorithms are identified by their TPM-compatible ids so the same value
/// appears in the JSON handle and in the DER-encoded associated data.
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use thiserror::Error;

/// An algorithm identifier that is not on the supported list.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unsupported digest algorithm {0:#06x}")]
pub struct UnsupportedAlg(pub u16);

/// A digest algorithm usable for platform key selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum HashAlg {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

macro_rules! hmac_tag {
    ($digest:ty, $key:expr, $msg:expr) => {{
        let mut mac =
            Hmac::<$digest>::new_from_slice($key).expect("HMAC accepts keys of any length");
        mac.update($msg);
        mac.finalize().into_bytes().to_vec()
    }};
}

macro_rules! hmac_check {
    ($digest:ty, $key:expr, $msg:expr, $tag:expr) => {{
        let mut mac =
            Hmac::<$digest>::new_from_slice($key).expect("HMAC accepts keys of any length");
        mac.update($msg);
        mac.verify_slice($tag).is_ok()
    }};
}

impl HashAlg {
    /// Stable on-wire identifier of this algorithm.
    pub fn id(self) -> u16 {
        match self {
            HashAlg::Sha1 => 0x0004,
            HashAlg::Sha256 => 0x000b,
            HashAlg::Sha384 => 0x000c,
            HashAlg::Sha512 => 0x000d,
        }
    }

    /// Whether the primitive behind this algorithm is linked into the build.
    pub fn available(self) -> bool {
        match self {
            HashAlg::Sha1 | HashAlg::Sha256 | HashAlg::Sha384 | HashAlg::Sha512 => true,
        }
    }

    /// Digest output length in bytes.
    pub fn size(self) -> usize {
        match self {
            HashAlg::Sha1 => 20,
            HashAlg::Sha256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }

    /// HMAC of `msg` under `key` with this algorithm.
    pub fn hmac(self, key: &[u8], msg: &[u8]) -> Vec<u8> {
        match self {
            HashAlg::Sha1 => hmac_tag!(Sha1, key, msg),
            HashAlg::Sha256 => hmac_tag!(Sha256, key, msg),
            HashAlg::Sha384 => hmac_tag!(Sha384, key, msg),
            HashAlg::Sha512 => hmac_tag!(Sha512, key, msg),
        }
    }

    /// Verify `tag` against HMAC of `msg` under `key` in constant time.
    pub fn verify_hmac(self, key: &[u8], msg: &[u8], tag: &[u8]) -> bool {
        match self {
            HashAlg::Sha1 => hmac_check!(Sha1, key, msg, tag),
            HashAlg::Sha256 => hmac_check!(Sha256, key, msg, tag),
            HashAlg::Sha384 => hmac_check!(Sha384, key, msg, tag),
            HashAlg::Sha512 => hmac_check!(Sha512, key, msg, tag),
        }
    }
}

impl TryFrom<u16> for HashAlg {
    type Error = UnsupportedAlg;

    fn try_from(id: u16) -> Result<Self, UnsupportedAlg> {
        match id {
            0x0004 => Ok(HashAlg::Sha1),
            0x000b => Ok(HashAlg::Sha256),
            0x000c => Ok(HashAlg::Sha384),
            0x000d => Ok(HashAlg::Sha512),
            other => Err(UnsupportedAlg(other)),
        }
    }
}

impl From<HashAlg> for u16 {
    fn from(alg: HashAlg) -> u16 {
        alg.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for alg in [HashAlg::Sha1, HashAlg::Sha256, HashAlg::Sha384, HashAlg::Sha512] {
            assert_eq!(HashAlg::try_from(alg.id()), Ok(alg));
        }
    }

    #[test]
    fn test_unknown_id_rejected() {
        assert_eq!(HashAlg::try_from(0x0042), Err(UnsupportedAlg(0x0042)));
        assert_eq!(
            UnsupportedAlg(0x0042).to_string(),
            "unsupported digest algorithm 0x0042"
        );
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&HashAlg::Sha256).unwrap(), "11");
        let alg: HashAlg = serde_json::from_str("11").unwrap();
        assert_eq!(alg, HashAlg::Sha256);
        assert!(serde_json::from_str::<HashAlg>("9999").is_err());
    }

    #[test]
    fn test_hmac_deterministic() {
        let key = [0x11u8; 32];
        let t1 = HashAlg::Sha256.hmac(&key, b"salt");
        let t2 = HashAlg::Sha256.hmac(&key, b"salt");
        assert_eq!(t1, t2);
        assert_eq!(t1.len(), HashAlg::Sha256.size());
    }

    #[test]
    fn test_hmac_output_sizes() {
        let key = b"key";
        for alg in [HashAlg::Sha1, HashAlg::Sha256, HashAlg::Sha384, HashAlg::Sha512] {
            assert_eq!(alg.hmac(key, b"msg").len(), alg.size());
        }
    }

    #[test]
    fn test_hmac_differs_across_algorithms() {
        let key = b"key";
        assert_ne!(
            HashAlg::Sha384.hmac(key, b"msg"),
            HashAlg::Sha512.hmac(key, b"msg")
        );
    }

    #[test]
    fn test_verify_hmac() {
        let key = b"platform key";
        let tag = HashAlg::Sha256.hmac(key, b"salt");
        assert!(HashAlg::Sha256.verify_hmac(key, b"salt", &tag));
        assert!(!HashAlg::Sha256.verify_hmac(key, b"other salt", &tag));
        assert!(!HashAlg::Sha256.verify_hmac(b"other key", b"salt", &tag));
        // Truncated tags never verify.
        assert!(!HashAlg::Sha256.verify_hmac(key, b"salt", &tag[..16]));
    }
}
