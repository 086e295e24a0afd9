//! EdDSA over Baby Jubjub (the twisted Edwards curve embedded in BN254).
//!
//! Guardians sign recovery messages with this scheme; the circuit in
//! `zkgr-circuit` re-verifies the same equation inside R1CS. The challenge
//! hash is Poseidon over `(R.x, R.y, A.x, A.y, m_lo, m_hi)` using the shared
//! [`POSEIDON_CONFIG`](crate::POSEIDON_CONFIG), so the native and in-circuit
//! computations agree bit-exactly.
//!
//! Verification equation, with `B` the prime-order subgroup generator:
//!
//! ```text
//! S · B == R + c · A        c = Poseidon(R.x, R.y, A.x, A.y, m_lo, m_hi)
//! ```
//!
//! The challenge is used as an unreduced integer scalar on both sides; since
//! `A` and `R` live in the prime-order subgroup the result only depends on
//! `c mod ℓ`, which keeps the circuit free of a scalar-field reduction.

use ark_bn254::Fr;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ed_on_bn254::{EdwardsAffine, EdwardsProjective, Fr as JubScalar};
use ark_ff::{BigInteger, PrimeField};
use thiserror::Error;

use crate::{message_halves, poseidon_hash, MESSAGE_LEN};

pub const SEED_LEN: usize = 32;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("signing key seed must be {SEED_LEN} bytes, got {0}")]
    BadSeedLength(usize),
}

/// A guardian's signing key, derived from a 32-byte seed.
#[derive(Clone, Debug)]
pub struct GuardianSigningKey {
    scalar: JubScalar,
    seed: [u8; SEED_LEN],
}

/// A guardian's public key. Only its Poseidon commitment ever reaches the
/// registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardianPublicKey(EdwardsAffine);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardianSignature {
    pub r: EdwardsAffine,
    pub s: JubScalar,
}

impl GuardianSigningKey {
    /// Derive a signing key from a seed. The scalar is expanded through the
    /// blake3 XOF and reduced mod the subgroup order, so any uniformly random
    /// seed yields a uniformly random scalar.
    pub fn from_seed(seed: &[u8]) -> Result<Self, KeyError> {
        if seed.len() != SEED_LEN {
            return Err(KeyError::BadSeedLength(seed.len()));
        }
        let mut fixed = [0u8; SEED_LEN];
        fixed.copy_from_slice(seed);

        let mut wide = [0u8; 64];
        blake3::Hasher::new()
            .update(b"zkgr/eddsa-key")
            .update(&fixed)
            .finalize_xof()
            .fill(&mut wide);
        let scalar = JubScalar::from_le_bytes_mod_order(&wide);

        Ok(Self {
            scalar,
            seed: fixed,
        })
    }

    pub fn public_key(&self) -> GuardianPublicKey {
        GuardianPublicKey((EdwardsAffine::generator() * self.scalar).into_affine())
    }

    /// Sign a recovery message. The nonce is derived deterministically from
    /// the seed and the message, so signing never consumes ambient
    /// randomness and repeated calls return the identical signature.
    pub fn sign(&self, message: &[u8; MESSAGE_LEN]) -> GuardianSignature {
        let mut wide = [0u8; 64];
        blake3::Hasher::new()
            .update(b"zkgr/eddsa-nonce")
            .update(&self.seed)
            .update(message)
            .finalize_xof()
            .fill(&mut wide);
        let nonce = JubScalar::from_le_bytes_mod_order(&wide);

        let r = (EdwardsAffine::generator() * nonce).into_affine();
        let a = self.public_key().0;
        let c = challenge(&r, &a, message);
        let c_scalar = JubScalar::from_le_bytes_mod_order(&c.into_bigint().to_bytes_le());
        let s = nonce + c_scalar * self.scalar;

        GuardianSignature { r, s }
    }
}

impl GuardianPublicKey {
    pub fn point(&self) -> EdwardsAffine {
        self.0
    }

    /// Affine coordinates in the BN254 scalar field, the commitment preimage.
    pub fn coordinates(&self) -> (Fr, Fr) {
        (self.0.x, self.0.y)
    }
}

/// Poseidon challenge binding the nonce point, public key, and message.
pub fn challenge(r: &EdwardsAffine, a: &EdwardsAffine, message: &[u8; MESSAGE_LEN]) -> Fr {
    let (m_lo, m_hi) = message_halves(message);
    poseidon_hash(&[r.x, r.y, a.x, a.y, m_lo, m_hi])
}

/// Native signature verification, the reference for the circuit gadget.
pub fn verify(
    public_key: &GuardianPublicKey,
    message: &[u8; MESSAGE_LEN],
    signature: &GuardianSignature,
) -> bool {
    let c = challenge(&signature.r, &public_key.0, message);
    let lhs = EdwardsAffine::generator() * signature.s;
    let rhs =
        EdwardsProjective::from(signature.r) + public_key.0.mul_bigint(c.into_bigint());
    lhs == rhs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_recovery_message;
    use crate::Address;

    fn sample_message() -> [u8; MESSAGE_LEN] {
        encode_recovery_message(2, &Address([0x36; 20]))
    }

    #[test]
    fn sign_verify_round_trip() {
        let key = GuardianSigningKey::from_seed(&[0x11; 32]).unwrap();
        let message = sample_message();
        let signature = key.sign(&message);
        assert!(verify(&key.public_key(), &message, &signature));
    }

    #[test]
    fn signing_is_deterministic() {
        let key = GuardianSigningKey::from_seed(&[0x11; 32]).unwrap();
        let message = sample_message();
        assert_eq!(key.sign(&message), key.sign(&message));
    }

    #[test]
    fn verify_rejects_wrong_message() {
        let key = GuardianSigningKey::from_seed(&[0x11; 32]).unwrap();
        let signature = key.sign(&sample_message());
        let other = encode_recovery_message(3, &Address([0x36; 20]));
        assert!(!verify(&key.public_key(), &other, &signature));
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let key = GuardianSigningKey::from_seed(&[0x11; 32]).unwrap();
        let other = GuardianSigningKey::from_seed(&[0x22; 32]).unwrap();
        let message = sample_message();
        let signature = key.sign(&message);
        assert!(!verify(&other.public_key(), &message, &signature));
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let key = GuardianSigningKey::from_seed(&[0x11; 32]).unwrap();
        let message = sample_message();
        let mut signature = key.sign(&message);
        signature.s += JubScalar::from(1u64);
        assert!(!verify(&key.public_key(), &message, &signature));
    }

    #[test]
    fn seed_length_is_checked() {
        assert_eq!(
            GuardianSigningKey::from_seed(&[0u8; 16]).unwrap_err(),
            KeyError::BadSeedLength(16)
        );
    }
}
