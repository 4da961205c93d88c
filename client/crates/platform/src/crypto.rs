//! Cryptographic Utilities
//!
//! Hashing and encoding helpers plus the AES-256-GCM sealing used for
//! credentials remembered on this device. Sealed values are
//! `base64(nonce (12 bytes) || ciphertext)`.

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

const NONCE_LEN: usize = 12;

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Errors from sealing or opening a value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    #[error("Sealing key must not be empty")]
    EmptySecret,

    #[error("Encryption failed")]
    Encrypt,

    #[error("Sealed value is not valid base64")]
    Encoding,

    #[error("Sealed value is too short")]
    Truncated,

    /// Wrong key or tampered ciphertext
    #[error("Decryption failed")]
    Decrypt,

    #[error("Decrypted value is not UTF-8")]
    Utf8,
}

/// 256-bit symmetric key, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SealingKey([u8; 32]);

impl SealingKey {
    /// Derive a key from an application secret
    pub fn derive(secret: &str) -> Result<Self, CryptoError> {
        if secret.is_empty() {
            return Err(CryptoError::EmptySecret);
        }
        Ok(Self(sha256(secret.as_bytes())))
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }
}

impl std::fmt::Debug for SealingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SealingKey(..)")
    }
}

/// Encrypt `plaintext`; every call uses a fresh random nonce
pub fn seal(key: &SealingKey, plaintext: &str) -> Result<String, CryptoError> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = key
        .cipher()
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|_| CryptoError::Encrypt)?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);

    Ok(to_base64(&sealed))
}

/// Decrypt a value produced by [`seal`] with the same key
pub fn open(key: &SealingKey, sealed: &str) -> Result<String, CryptoError> {
    let data = from_base64(sealed.trim()).map_err(|_| CryptoError::Encoding)?;
    if data.len() <= NONCE_LEN {
        return Err(CryptoError::Truncated);
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
    let plaintext = key
        .cipher()
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CryptoError::Decrypt)?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::Utf8)
}
