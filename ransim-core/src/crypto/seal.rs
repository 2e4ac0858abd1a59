use crate::error::{Result, SimError};
use chacha20poly1305::{
    Key, XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use time::OffsetDateTime;

pub const MAGIC: &[u8; 6] = b"RANSIM";
pub const VERSION: u16 = 1;

/// magic (6) + version u16 LE (2) + unix timestamp i64 LE (8)
pub const HEADER_LEN: usize = 16;
pub const NONCE_LEN: usize = 24;
pub const TAG_LEN: usize = 16;
/// Fixed growth of a sealed blob over its plaintext.
pub const BLOB_OVERHEAD: usize = HEADER_LEN + NONCE_LEN + TAG_LEN;

/// Per-run key. Lives only in process memory; there is no Debug impl and
/// nothing ever writes it out.
#[derive(Clone)]
pub struct SealKey([u8; 32]);

impl SealKey {
    pub fn generate() -> Result<Self> {
        let mut key = [0u8; 32];
        getrandom::getrandom(&mut key).map_err(|e| SimError::Crypto(format!("keygen: {e}")))?;
        Ok(Self(key))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Seal a whole buffer into a standalone blob:
    /// header | nonce | ciphertext+tag, with the header bound as AAD.
    pub fn seal(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut header = [0u8; HEADER_LEN];
        header[..6].copy_from_slice(MAGIC);
        header[6..8].copy_from_slice(&VERSION.to_le_bytes());
        let ts = OffsetDateTime::now_utc().unix_timestamp();
        header[8..16].copy_from_slice(&ts.to_le_bytes());

        let mut nonce = [0u8; NONCE_LEN];
        getrandom::getrandom(&mut nonce).expect("nonce");

        let aead = XChaCha20Poly1305::new(Key::from_slice(&self.0));
        let ciphertext = aead
            .encrypt(
                XNonce::from_slice(&nonce),
                chacha20poly1305::aead::Payload {
                    msg: plaintext,
                    aad: &header,
                },
            )
            .expect("encrypt");

        let mut blob = Vec::with_capacity(BLOB_OVERHEAD + plaintext.len());
        blob.extend_from_slice(&header);
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        blob
    }

    /// Open a sealed blob. Any header mismatch or authentication failure
    /// is a crypto error; the blob carries everything needed except the key.
    pub fn open(&self, blob: &[u8]) -> Result<Vec<u8>> {
        if blob.len() < BLOB_OVERHEAD {
            return Err(SimError::Crypto("sealed blob too short".into()));
        }
        let (header, rest) = blob.split_at(HEADER_LEN);
        let mut magic = [0u8; 6];
        magic.copy_from_slice(&header[..6]);
        if &magic != MAGIC {
            return Err(SimError::Crypto("bad magic".into()));
        }
        let version = u16::from_le_bytes([header[6], header[7]]);
        if version != VERSION {
            return Err(SimError::Crypto(format!("unsupported version {version}")));
        }

        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
        let aead = XChaCha20Poly1305::new(Key::from_slice(&self.0));
        aead.decrypt(
            XNonce::from_slice(nonce),
            chacha20poly1305::aead::Payload {
                msg: ciphertext,
                aad: header,
            },
        )
        .map_err(|_| SimError::Crypto("authentication failed".into()))
    }
}

/// Unix timestamp embedded at seal time.
pub fn sealed_at(blob: &[u8]) -> Result<i64> {
    if blob.len() < HEADER_LEN {
        return Err(SimError::Crypto("sealed blob too short".into()));
    }
    let mut magic = [0u8; 6];
    magic.copy_from_slice(&blob[..6]);
    if &magic != MAGIC {
        return Err(SimError::Crypto("bad magic".into()));
    }
    let mut ts = [0u8; 8];
    ts.copy_from_slice(&blob[8..16]);
    Ok(i64::from_le_bytes(ts))
}
