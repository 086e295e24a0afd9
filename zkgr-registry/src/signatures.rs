// zkgr/zkgr-registry/src/signatures.rs
//
// The non-ZK sibling of the recovery path: guardians identified by plain
// addresses confirm with secp256k1 signatures instead of proofs. Signatures
// must arrive sorted strictly ascending by recovered signer address, which
// makes double-counting a signer structurally impossible.

use std::collections::HashSet;

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use thiserror::Error;

use zkgr_common::Address;

#[derive(Clone, Debug)]
pub struct RecoverableSignature {
    pub signature: Signature,
    pub recovery_id: RecoveryId,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature {index} does not recover to a valid key")]
    Recovery { index: usize },
    #[error("recovered signers must be in strictly ascending address order")]
    UnsortedSigners,
}

/// Recover the Ethereum-style signer address of a prehashed message.
pub fn recover_address(
    digest: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<Address, k256::ecdsa::Error> {
    let key =
        VerifyingKey::recover_from_prehash(digest, &signature.signature, signature.recovery_id)?;
    let point = key.to_encoded_point(false);
    Ok(Address::from_keccak(&point.as_bytes()[1..]))
}

/// Count distinct valid guardian signatures over `digest`.
///
/// Returns `true` iff at least `required` of the recovered signers are in the
/// guardian set. Signers outside the set are skipped, not errors; an
/// unrecoverable signature or an ordering violation rejects the whole batch.
pub fn check_signatures(
    guardians: &HashSet<Address>,
    digest: &[u8; 32],
    signatures: &[RecoverableSignature],
    required: usize,
) -> Result<bool, SignatureError> {
    let mut last_signer: Option<Address> = None;
    let mut valid = 0usize;

    for (index, signature) in signatures.iter().enumerate() {
        let signer = recover_address(digest, signature)
            .map_err(|_| SignatureError::Recovery { index })?;
        if let Some(previous) = last_signer {
            if signer <= previous {
                return Err(SignatureError::UnsortedSigners);
            }
        }
        last_signer = Some(signer);
        if guardians.contains(&signer) {
            valid += 1;
        }
    }

    Ok(valid >= required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    fn signer(seed: u8) -> SigningKey {
        SigningKey::from_slice(&[seed; 32]).unwrap()
    }

    fn address_of(key: &SigningKey) -> Address {
        let point = key.verifying_key().to_encoded_point(false);
        Address::from_keccak(&point.as_bytes()[1..])
    }

    fn sign(key: &SigningKey, digest: &[u8; 32]) -> RecoverableSignature {
        let (signature, recovery_id) = key.sign_prehash_recoverable(digest).unwrap();
        RecoverableSignature {
            signature,
            recovery_id,
        }
    }

    /// Three guardian keys with their signatures over `digest`, sorted
    /// ascending by address.
    fn sorted_guardians(digest: &[u8; 32]) -> (Vec<SigningKey>, Vec<RecoverableSignature>) {
        let mut keys = vec![signer(0x21), signer(0x22), signer(0x23)];
        keys.sort_by_key(address_of);
        let signatures = keys.iter().map(|k| sign(k, digest)).collect();
        (keys, signatures)
    }

    #[test]
    fn recover_round_trips_the_signer() {
        let key = signer(0x42);
        let digest = [0x07; 32];
        let signature = sign(&key, &digest);
        assert_eq!(recover_address(&digest, &signature).unwrap(), address_of(&key));
    }

    #[test]
    fn quorum_of_sorted_signatures_passes() {
        let digest = [0x07; 32];
        let (keys, signatures) = sorted_guardians(&digest);
        let guardians: HashSet<Address> = keys.iter().map(address_of).collect();

        assert!(check_signatures(&guardians, &digest, &signatures, 3).unwrap());
        assert!(check_signatures(&guardians, &digest, &signatures[..2], 2).unwrap());
    }

    #[test]
    fn insufficient_signatures_fail_quietly() {
        let digest = [0x07; 32];
        let (keys, signatures) = sorted_guardians(&digest);
        let guardians: HashSet<Address> = keys.iter().map(address_of).collect();

        assert!(!check_signatures(&guardians, &digest, &signatures[..1], 2).unwrap());
    }

    #[test]
    fn unsorted_signatures_are_rejected() {
        let digest = [0x07; 32];
        let (keys, mut signatures) = sorted_guardians(&digest);
        let guardians: HashSet<Address> = keys.iter().map(address_of).collect();

        signatures.swap(0, 1);
        assert_eq!(
            check_signatures(&guardians, &digest, &signatures, 2),
            Err(SignatureError::UnsortedSigners)
        );
    }

    #[test]
    fn duplicate_signer_cannot_be_counted_twice() {
        let digest = [0x07; 32];
        let (keys, signatures) = sorted_guardians(&digest);
        let guardians: HashSet<Address> = keys.iter().map(address_of).collect();

        let doubled = vec![signatures[0].clone(), signatures[0].clone()];
        assert_eq!(
            check_signatures(&guardians, &digest, &doubled, 2),
            Err(SignatureError::UnsortedSigners)
        );
    }

    #[test]
    fn non_guardian_signers_do_not_count() {
        let digest = [0x07; 32];
        let (keys, _) = sorted_guardians(&digest);
        let guardians: HashSet<Address> = keys.iter().map(address_of).collect();

        let outsider = signer(0x99);
        let signatures = vec![sign(&outsider, &digest)];
        assert!(!check_signatures(&guardians, &digest, &signatures, 1).unwrap());
    }
}
