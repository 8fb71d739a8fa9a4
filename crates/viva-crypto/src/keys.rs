use aes_gcm::aead::OsRng;
use aes_gcm::aead::rand_core::RngCore;
use anyhow::{Result, bail};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Fresh AES-256 key for sealing vault passwords. Used when `VIVA_VAULT_KEY`
/// is not configured, in which case sealed entries die with the process.
pub fn generate_vault_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// The `VIVA_VAULT_KEY` form of a key.
pub fn key_to_base64(key: &[u8; 32]) -> String {
    BASE64.encode(key)
}

/// Parse `VIVA_VAULT_KEY`. Surrounding whitespace from `.env` files is ignored.
pub fn key_from_base64(encoded: &str) -> Result<[u8; 32]> {
    let bytes = BASE64.decode(encoded.trim())?;
    match <[u8; 32]>::try_from(bytes.as_slice()) {
        Ok(key) => Ok(key),
        Err(_) => bail!("Vault key must be 32 bytes, got {}", bytes.len()),
    }
}
