use crate::core::extrinsic::SIGNATURE_LEN;
use crate::error::{ExtrinsicError, Result};
use crate::utils::hex_decode;
use ring::signature::{Ed25519KeyPair, KeyPair, UnparsedPublicKey, ED25519};
use zeroize::{Zeroizing, ZeroizeOnDrop};

pub const SEED_LEN: usize = 32;

/// 32-byte ed25519 seed, zeroed when dropped
#[derive(Clone, ZeroizeOnDrop)]
pub struct SecretSeed {
    seed: [u8; SEED_LEN],
}

impl SecretSeed {
    pub fn new(seed: [u8; SEED_LEN]) -> Self {
        Self { seed }
    }

    pub fn from_hex(seed_hex: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex_decode(seed_hex)?);
        let seed: [u8; SEED_LEN] = bytes.as_slice().try_into().map_err(|_| {
            ExtrinsicError::InvalidFieldLength {
                field: "private key seed",
                expected: SEED_LEN,
                actual: bytes.len(),
            }
        })?;
        Ok(Self { seed })
    }

    /// Get seed bytes (use carefully)
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.seed
    }
}

impl std::fmt::Debug for SecretSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretSeed")
            .field("length", &SEED_LEN)
            .finish()
    }
}

/// Detached ed25519 signer over signature payload bytes
pub struct Signer {
    key_pair: Ed25519KeyPair,
}

impl Signer {
    pub fn from_seed(seed: &SecretSeed) -> Result<Signer> {
        let key_pair = Ed25519KeyPair::from_seed_unchecked(seed.as_bytes())
            .map_err(|e| ExtrinsicError::Crypto(format!("Rejected ed25519 seed: {e}")))?;
        Ok(Signer { key_pair })
    }

    pub fn from_seed_hex(seed_hex: &str) -> Result<Signer> {
        Self::from_seed(&SecretSeed::from_hex(seed_hex)?)
    }

    pub fn public_key(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(self.key_pair.public_key().as_ref());
        out
    }

    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
        let signature = self.key_pair.sign(message);
        let bytes = signature.as_ref();
        <[u8; SIGNATURE_LEN]>::try_from(bytes).map_err(|_| {
            ExtrinsicError::Crypto(format!(
                "sign fail, signature length {} is not {SIGNATURE_LEN}",
                bytes.len()
            ))
        })
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("public_key", &crate::utils::hex_encode(&self.public_key()))
            .finish()
    }
}

/// Sign `payload` with the seed given as hex
pub fn sign(seed_hex: &str, payload: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
    Signer::from_seed_hex(seed_hex)?.sign(payload)
}

pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    UnparsedPublicKey::new(&ED25519, public_key)
        .verify(message, signature)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hex_encode;

    #[test]
    fn test_rfc8032_test_vector_1() {
        let seed = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
        let signer = Signer::from_seed_hex(seed).unwrap();
        assert_eq!(
            hex_encode(&signer.public_key()),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
        let signature = signer.sign(b"").unwrap();
        assert_eq!(
            hex_encode(&signature),
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
             5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let signer = Signer::from_seed(&SecretSeed::new([7u8; 32])).unwrap();
        let signature = signer.sign(b"payload").unwrap();
        assert!(verify(&signer.public_key(), b"payload", &signature));
        assert!(!verify(&signer.public_key(), b"payload!", &signature));

        let mut tampered = signature;
        tampered[0] ^= 0x01;
        assert!(!verify(&signer.public_key(), b"payload", &tampered));
    }

    #[test]
    fn test_seed_length_is_checked() {
        assert!(matches!(
            SecretSeed::from_hex("0x0102"),
            Err(ExtrinsicError::InvalidFieldLength { actual: 2, .. })
        ));
        assert!(matches!(
            sign("nothex", b"x"),
            Err(ExtrinsicError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_debug_does_not_leak_seed() {
        let seed = SecretSeed::new([0x42u8; 32]);
        let rendered = format!("{seed:?}");
        assert!(!rendered.contains("42"));
    }
}
