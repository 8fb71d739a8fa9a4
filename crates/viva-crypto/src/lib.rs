//! Viva Crypto Library
//!
//! Vault secrets are sealed with AES-256-GCM under a single server-held key
//! before they are written to storage. The key is configured out-of-band
//! (base64 in the environment); a per-user key hierarchy is not implemented.

pub mod keys;
pub mod seal;
