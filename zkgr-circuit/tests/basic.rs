use ark_bn254::Fr;
use ark_ed_on_bn254::Fr as JubScalar;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem};

use zkgr_circuit::{gadgets::recovery::RecoveryWitness, GuardianCircuit, GuardianCircuitInput};
use zkgr_common::{
    eddsa::GuardianSigningKey, encode_recovery_message, guardian_commitment, Address,
    RecoverySignals,
};

const BASE_SEED: [u8; 32] = [0x11; 32];
const OTHER_SEED: [u8; 32] = [0x22; 32];
const BASE_INCREMENT: u64 = 2;

fn base_address() -> Address {
    "0x019b4ee7ad22ffd4c215e5f424faf4c75577dc36".parse().unwrap()
}

fn valid_input() -> GuardianCircuitInput {
    build_input(&BASE_SEED, BASE_INCREMENT, base_address())
}

fn build_input(seed: &[u8; 32], increment: u64, address: Address) -> GuardianCircuitInput {
    let key = GuardianSigningKey::from_seed(seed).unwrap();
    let message = encode_recovery_message(increment, &address);
    GuardianCircuitInput {
        witness: RecoveryWitness {
            public_key: key.public_key(),
            signature: key.sign(&message),
            message,
        },
        public: RecoverySignals {
            hash_public_key: guardian_commitment(&key.public_key()),
            increment,
            address,
        },
    }
}

fn is_satisfied(input: GuardianCircuitInput) -> bool {
    let cs = ConstraintSystem::<Fr>::new_ref();
    GuardianCircuit::new(Some(input))
        .generate_constraints(cs.clone())
        .unwrap();
    cs.is_satisfied().unwrap()
}

#[test]
fn valid_witness_satisfies() {
    assert!(is_satisfied(valid_input()));
}

#[test]
fn keygen_shape_satisfies() {
    let cs = ConstraintSystem::<Fr>::new_ref();
    GuardianCircuit::keygen()
        .generate_constraints(cs.clone())
        .unwrap();
    assert!(cs.is_satisfied().unwrap());
}

#[test]
fn tampered_scalar_fails() {
    let mut input = valid_input();
    input.witness.signature.s += JubScalar::from(1u64);
    assert!(!is_satisfied(input));
}

#[test]
fn tampered_nonce_point_fails() {
    let mut input = valid_input();
    let other = GuardianSigningKey::from_seed(&OTHER_SEED).unwrap();
    input.witness.signature.r = other.sign(&input.witness.message).r;
    assert!(!is_satisfied(input));
}

#[test]
fn wrong_commitment_fails() {
    let mut input = valid_input();
    input.public.hash_public_key += Fr::from(1u64);
    assert!(!is_satisfied(input));
}

#[test]
fn foreign_key_fails_commitment_check() {
    // A perfectly valid signature by a different key cannot satisfy the
    // original guardian's commitment.
    let mut input = build_input(&OTHER_SEED, BASE_INCREMENT, base_address());
    let original = GuardianSigningKey::from_seed(&BASE_SEED).unwrap();
    input.public.hash_public_key = guardian_commitment(&original.public_key());
    assert!(!is_satisfied(input));
}

#[test]
fn wrong_increment_fails() {
    let mut input = valid_input();
    input.public.increment = BASE_INCREMENT + 1;
    assert!(!is_satisfied(input));
}

#[test]
fn wrong_address_fails() {
    let mut input = valid_input();
    input.public.address = Address([0x99; 20]);
    assert!(!is_satisfied(input));
}

#[test]
fn nonzero_padding_fails() {
    let mut input = valid_input();
    input.witness.message[9] = 0x01;
    input.witness.signature = GuardianSigningKey::from_seed(&BASE_SEED)
        .unwrap()
        .sign(&input.witness.message);
    assert!(!is_satisfied(input));
}

#[test]
fn message_must_match_public_signals_not_just_signature() {
    // Sign a message for a different increment; the signature itself is
    // valid, but the message-encoding constraint pins it to the public pair.
    let key = GuardianSigningKey::from_seed(&BASE_SEED).unwrap();
    let message = encode_recovery_message(BASE_INCREMENT + 5, &base_address());
    let input = GuardianCircuitInput {
        witness: RecoveryWitness {
            public_key: key.public_key(),
            signature: key.sign(&message),
            message,
        },
        public: RecoverySignals {
            hash_public_key: guardian_commitment(&key.public_key()),
            increment: BASE_INCREMENT,
            address: base_address(),
        },
    };
    assert!(!is_satisfied(input));
}
