//! Key handling and signing
//!
//! Seed-based ed25519 signing of signature payloads.

pub mod signer;

pub use signer::{sign, verify, SecretSeed, Signer, SEED_LEN};
