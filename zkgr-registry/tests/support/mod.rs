#![allow(dead_code)]

use std::collections::HashMap;

use ark_bn254::{Bn254, Fr, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_groth16::VerifyingKey;
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};

use zkgr_common::{
    eddsa::GuardianSigningKey, encode_recovery_message, generate_calldata, guardian_commitment,
    Address, Groth16Calldata,
};
use zkgr_prover::{generate_proof, setup, ProverKeys};
use zkgr_registry::{AccountDirectory, AccountError, AccountOps};

/// One Groth16 setup shared by every test in the binary.
pub static KEYS: Lazy<ProverKeys> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(99);
    setup(&mut rng).expect("setup")
});

/// Structurally valid key material for tests that never verify a proof.
pub fn dummy_vk() -> VerifyingKey<Bn254> {
    VerifyingKey {
        alpha_g1: G1Affine::generator(),
        beta_g2: G2Affine::generator(),
        gamma_g2: G2Affine::generator(),
        delta_g2: G2Affine::generator(),
        gamma_abc_g1: vec![G1Affine::generator(); 4],
    }
}

pub fn guardian_key(seed: u8) -> GuardianSigningKey {
    GuardianSigningKey::from_seed(&[seed; 32]).unwrap()
}

pub fn commitment_of(seed: u8) -> Fr {
    guardian_commitment(&guardian_key(seed).public_key())
}

/// Build the on-chain confirmation calldata a guardian would submit for
/// `candidate` at the given replay counter.
pub fn confirm_calldata(increment: u64, candidate: &Address, seed: u8) -> Groth16Calldata {
    let key = guardian_key(seed);
    let message = encode_recovery_message(increment, candidate);
    let mut rng = StdRng::seed_from_u64(seed as u64 + 1);
    let (proof, signals) = generate_proof(&message, &key, &KEYS.pk, &mut rng).unwrap();
    generate_calldata(&proof, &signals).unwrap()
}

pub struct MockAccount {
    owner: Address,
}

impl MockAccount {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }
}

impl AccountOps for MockAccount {
    fn owner(&self) -> Address {
        self.owner
    }

    fn change_owner(&mut self, new_owner: Address) -> Result<(), AccountError> {
        self.owner = new_owner;
        Ok(())
    }
}

/// Deterministic per-owner account lookup, owner → deployed account.
#[derive(Default)]
pub struct MockFactory {
    accounts: HashMap<Address, Address>,
}

impl MockFactory {
    pub fn provision(&mut self, owner: Address, account: Address) {
        self.accounts.insert(owner, account);
    }
}

impl AccountDirectory for MockFactory {
    fn account_of(&self, owner: &Address) -> Option<Address> {
        self.accounts.get(owner).copied()
    }

    fn reassign(&mut self, old_owner: &Address, new_owner: &Address) {
        if let Some(account) = self.accounts.remove(old_owner) {
            self.accounts.insert(*new_owner, account);
        }
    }
}
