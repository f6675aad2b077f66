//! Envelope encryption.
//!
//! Every mode seals bundles in the same authenticated container. Only the
//! way key material is obtained differs:
//!
//! - **Passphrase**: [`KeyMaterial::from_passphrase`], memory-hard scrypt.
//! - **Raw key**: [`KeyMaterial::from_raw_key`], a 32-byte random secret
//!   (cached project key or cloud data key).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::core::constants::KEY_LEN;
use crate::error::{CipherError, Result, StoreError};

mod age;

pub use age::Age;

/// A 32-byte symmetric key that is wiped on drop.
pub type RawKey = Zeroizing<[u8; KEY_LEN]>;

/// Key material for one encrypt or decrypt call.
pub struct KeyMaterial {
    source: Source,
}

enum Source {
    Passphrase(Zeroizing<String>),
    Raw(RawKey),
}

impl KeyMaterial {
    /// Key material derived from a user passphrase.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self {
            source: Source::Passphrase(Zeroizing::new(passphrase.to_string())),
        }
    }

    /// Key material wrapping an already-random 32-byte key.
    pub fn from_raw_key(key: &[u8; KEY_LEN]) -> Self {
        Self {
            source: Source::Raw(Zeroizing::new(*key)),
        }
    }

    /// Whether this material came from a raw key rather than a passphrase.
    pub fn is_raw(&self) -> bool {
        matches!(self.source, Source::Raw(_))
    }

    /// Secret text handed to the envelope's scrypt stanza.
    ///
    /// Raw keys are base64-encoded so bundles stay readable by any age
    /// implementation given the same key text.
    pub(crate) fn secret(&self) -> Zeroizing<String> {
        match &self.source {
            Source::Passphrase(p) => p.clone(),
            Source::Raw(k) => Zeroizing::new(STANDARD.encode(&k[..])),
        }
    }
}

/// Authenticated encryption backend.
pub trait Cipher {
    /// Seal `plaintext` under `key`.
    fn encrypt(&self, plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>>;

    /// Open `ciphertext` with `key`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` for any failure, whether the
    /// key is wrong or the ciphertext was tampered with. No partial
    /// plaintext is ever returned.
    fn decrypt(&self, ciphertext: &[u8], key: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>>;
}

/// Encrypt with the default age backend.
pub fn encrypt(plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    Age.encrypt(plaintext, key)
}

/// Decrypt with the default age backend.
pub fn decrypt(ciphertext: &[u8], key: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>> {
    Age.decrypt(ciphertext, key)
}

/// Generate a fresh random 32-byte key from the OS RNG.
pub fn generate_key() -> Result<RawKey> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    OsRng
        .try_fill_bytes(&mut key[..])
        .map_err(|e| StoreError::Random(e.to_string()))?;
    Ok(key)
}

/// Generate `len` random bytes and return them base64-encoded.
pub fn random_b64(len: usize) -> Result<String> {
    let mut bytes = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| StoreError::Random(e.to_string()))?;
    Ok(STANDARD.encode(bytes))
}

/// Decode a base64 key, requiring exactly 32 bytes.
pub fn key_from_base64(encoded: &str) -> Result<RawKey> {
    let bytes = Zeroizing::new(
        STANDARD
            .decode(encoded.trim())
            .map_err(|e| CipherError::InvalidKeyEncoding(e.to_string()))?,
    );
    if bytes.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength(bytes.len()).into());
    }
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Encode a key as base64.
pub fn key_to_base64(key: &[u8; KEY_LEN]) -> Zeroizing<String> {
    Zeroizing::new(STANDARD.encode(key))
}

/// Short, non-reversible fingerprint of a key for display.
pub fn fingerprint(key: &[u8; KEY_LEN]) -> String {
    let digest = Sha256::digest(key);
    digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
}
