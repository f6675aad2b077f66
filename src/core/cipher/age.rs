//! Age encryption backend implementation.
//!
//! Bundles are binary age files with a single scrypt stanza. Armored input
//! is accepted on decrypt as well.

use std::io::{Read, Write};

use ::age::secrecy::SecretString;
use ::age::{armor::ArmoredReader, scrypt};
use tracing::trace;
use zeroize::Zeroizing;

use super::{Cipher, KeyMaterial};
use crate::error::{CipherError, Result};

/// scrypt log2(N) for raw keys. A uniformly random 256-bit key gains
/// nothing from stretching, so the cost is kept minimal.
const RAW_KEY_WORK_FACTOR: u8 = 10;

/// Age-based envelope using scrypt recipients.
pub struct Age;

impl Age {
    fn recipient(key: &KeyMaterial) -> scrypt::Recipient {
        let secret = key.secret();
        let mut recipient = scrypt::Recipient::new(SecretString::from(secret.to_string()));
        if key.is_raw() {
            recipient.set_work_factor(RAW_KEY_WORK_FACTOR);
        }
        recipient
    }

    fn identity(key: &KeyMaterial) -> scrypt::Identity {
        let secret = key.secret();
        scrypt::Identity::new(SecretString::from(secret.to_string()))
    }
}

impl Cipher for Age {
    fn encrypt(&self, plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
        trace!(
            plaintext_len = plaintext.len(),
            raw_key = key.is_raw(),
            "encrypting"
        );

        let recipient = Self::recipient(key);
        let encryptor =
            ::age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn ::age::Recipient))
                .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        let mut encrypted = Vec::with_capacity(plaintext.len() + 256);
        let mut writer = encryptor
            .wrap_output(&mut encrypted)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
        writer
            .write_all(plaintext)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");
        Ok(encrypted)
    }

    fn decrypt(&self, ciphertext: &[u8], key: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        // Every failure below collapses into one opaque error.
        let decryptor = ::age::Decryptor::new(ArmoredReader::new(ciphertext))
            .map_err(|_| CipherError::DecryptionFailed)?;

        let identity = Self::identity(key);
        let mut reader = decryptor
            .decrypt(std::iter::once(&identity as &dyn ::age::Identity))
            .map_err(|_| CipherError::DecryptionFailed)?;

        let mut decrypted = Zeroizing::new(Vec::with_capacity(ciphertext.len()));
        reader
            .read_to_end(&mut decrypted)
            .map_err(|_| CipherError::DecryptionFailed)?;

        trace!(plaintext_len = decrypted.len(), "decrypted");
        Ok(decrypted)
    }
}
