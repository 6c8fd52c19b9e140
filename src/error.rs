use thiserror::Error;

use crate::secboot::PlatformHandlerError;

#[derive(Error, Debug)]
pub enum Error {
    /// The encoded handle is not a valid key-data JSON document.
    #[error(transparent)]
    ParseHandle(#[from] serde_json::Error),

    /// The handle nonce is shorter than the KDF salt prefix.
    #[error("invalid nonce size")]
    InvalidNonceSize,

    /// The authenticated context could not be DER-encoded.
    #[error("cannot serialize AAD: {0}")]
    SerializeAad(#[from] der::Error),

    /// No stored platform key matches the handle's key identifier.
    #[error("cannot select platform key: {0}")]
    SelectPlatformKey(#[from] SelectKeyError),

    /// The block cipher rejected the derived key.
    #[error("cannot create cipher: {0}")]
    CreateCipher(String),

    /// No AEAD instantiation exists for the requested nonce size.
    #[error("cannot create AEAD: {0}")]
    CreateAead(String),

    /// The payload could not be encrypted.
    #[error("cannot seal payload: {0}")]
    SealPayload(String),

    /// Authentication of the payload failed.
    #[error("cannot open payload: {0}")]
    OpenPayload(String),
}

/// Why no platform key could be selected for a handle.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKeyError {
    /// The handle references a digest algorithm this build cannot compute.
    #[error("digest algorithm unavailable")]
    DigestAlgorithmUnavailable,

    /// No stored key reproduces the handle's digest.
    #[error("no key available")]
    NoKeyAvailable,
}

/// How recovery failures surface to the secure-boot framework: cipher
/// construction problems are internal, everything else is attributable to
/// the supplied key data.
impl From<Error> for PlatformHandlerError {
    fn from(err: Error) -> Self {
        match err {
            Error::CreateCipher(_) | Error::CreateAead(_) | Error::SealPayload(_) => {
                PlatformHandlerError::Internal(err.to_string())
            }
            _ => PlatformHandlerError::InvalidData(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
