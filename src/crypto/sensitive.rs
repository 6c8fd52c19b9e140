/// Wrappers for key material that is automatically zeroized on drop.
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A derived 32-byte AES key, zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AesKey([u8; 32]);

impl AesKey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for AesKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An opaque platform key supplied by the boot environment.
///
/// The bytes are never interpreted; they key the selection HMAC and feed
/// the payload KDF.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PlatformKey(Vec<u8>);

impl PlatformKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for PlatformKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PlatformKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for PlatformKey {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}
