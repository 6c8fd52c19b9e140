/// AES-256-GCM sealing and opening for protected payloads.
///
/// The handle's AEAD nonce is caller-chosen length, so the cipher is
/// instantiated for the exact size presented instead of the usual 12-byte
/// default. Every nonce size from 1 through 64 bytes is accepted; anything
/// beyond that fails AEAD construction.
use aes_gcm::{
    aead::{
        generic_array::{ArrayLength, GenericArray},
        Aead, KeyInit, Payload,
    },
    aes::{cipher::consts::*, Aes256},
    AesGcm,
};

use crate::crypto::sensitive::AesKey;
use crate::error::{Error, Result};

pub const KEY_LEN: usize = 32;
pub const TAG_LEN: usize = 16;

fn seal_sized<N>(key: &AesKey, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>>
where
    N: ArrayLength<u8>,
    AesGcm<Aes256, N>: KeyInit + Aead,
{
    let cipher = AesGcm::<Aes256, N>::new_from_slice(key.as_bytes())
        .map_err(|e| Error::CreateCipher(e.to_string()))?;
    cipher
        .encrypt(
            GenericArray::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| Error::SealPayload(e.to_string()))
}

fn open_sized<N>(key: &AesKey, nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>>
where
    N: ArrayLength<u8>,
    AesGcm<Aes256, N>: KeyInit + Aead,
{
    let cipher = AesGcm::<Aes256, N>::new_from_slice(key.as_bytes())
        .map_err(|e| Error::CreateCipher(e.to_string()))?;
    cipher
        .decrypt(
            GenericArray::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|e| Error::OpenPayload(e.to_string()))
}

macro_rules! with_nonce_size {
    ($len:expr, $call:ident, $($arg:expr),+) => {
        match $len {
            1 => $call::<U1>($($arg),+),
            2 => $call::<U2>($($arg),+),
            3 => $call::<U3>($($arg),+),
            4 => $call::<U4>($($arg),+),
            5 => $call::<U5>($($arg),+),
            6 => $call::<U6>($($arg),+),
            7 => $call::<U7>($($arg),+),
            8 => $call::<U8>($($arg),+),
            9 => $call::<U9>($($arg),+),
            10 => $call::<U10>($($arg),+),
            11 => $call::<U11>($($arg),+),
            12 => $call::<U12>($($arg),+),
            13 => $call::<U13>($($arg),+),
            14 => $call::<U14>($($arg),+),
            15 => $call::<U15>($($arg),+),
            16 => $call::<U16>($($arg),+),
            17 => $call::<U17>($($arg),+),
            18 => $call::<U18>($($arg),+),
            19 => $call::<U19>($($arg),+),
            20 => $call::<U20>($($arg),+),
            21 => $call::<U21>($($arg),+),
            22 => $call::<U22>($($arg),+),
            23 => $call::<U23>($($arg),+),
            24 => $call::<U24>($($arg),+),
            25 => $call::<U25>($($arg),+),
            26 => $call::<U26>($($arg),+),
            27 => $call::<U27>($($arg),+),
            28 => $call::<U28>($($arg),+),
            29 => $call::<U29>($($arg),+),
            30 => $call::<U30>($($arg),+),
            31 => $call::<U31>($($arg),+),
            32 => $call::<U32>($($arg),+),
            33 => $call::<U33>($($arg),+),
            34 => $call::<U34>($($arg),+),
            35 => $call::<U35>($($arg),+),
            36 => $call::<U36>($($arg),+),
            37 => $call::<U37>($($arg),+),
            38 => $call::<U38>($($arg),+),
            39 => $call::<U39>($($arg),+),
            40 => $call::<U40>($($arg),+),
            41 => $call::<U41>($($arg),+),
            42 => $call::<U42>($($arg),+),
            43 => $call::<U43>($($arg),+),
            44 => $call::<U44>($($arg),+),
            45 => $call::<U45>($($arg),+),
            46 => $call::<U46>($($arg),+),
            47 => $call::<U47>($($arg),+),
            48 => $call::<U48>($($arg),+),
            49 => $call::<U49>($($arg),+),
            50 => $call::<U50>($($arg),+),
            51 => $call::<U51>($($arg),+),
            52 => $call::<U52>($($arg),+),
            53 => $call::<U53>($($arg),+),
            54 => $call::<U54>($($arg),+),
            55 => $call::<U55>($($arg),+),
            56 => $call::<U56>($($arg),+),
            57 => $call::<U57>($($arg),+),
            58 => $call::<U58>($($arg),+),
            59 => $call::<U59>($($arg),+),
            60 => $call::<U60>($($arg),+),
            61 => $call::<U61>($($arg),+),
            62 => $call::<U62>($($arg),+),
            63 => $call::<U63>($($arg),+),
            64 => $call::<U64>($($arg),+),
            other => Err(Error::CreateAead(format!("unsupported nonce size {other}"))),
        }
    };
}

/// Encrypt and authenticate `plaintext` under `nonce` and `aad`.
///
/// Returns ciphertext with the 16-byte tag appended.
pub fn seal(key: &AesKey, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    with_nonce_size!(nonce.len(), seal_sized, key, nonce, plaintext, aad)
}

/// Decrypt and verify a sealed payload.
///
/// Fails if the key, nonce, AAD, or ciphertext differ in any way from what
/// was sealed.
pub fn open(key: &AesKey, nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    with_nonce_size!(nonce.len(), open_sized, key, nonce, ciphertext, aad)
}
