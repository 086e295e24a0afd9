// zkgr/zkgr-circuit/src/gadgets/poseidon.rs

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::constraints::CryptographicSpongeVar;
use ark_crypto_primitives::sponge::poseidon::constraints::PoseidonSpongeVar;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use zkgr_common::POSEIDON_CONFIG;

pub fn hash_pair(
    cs: ConstraintSystemRef<Fr>,
    a: &FpVar<Fr>,
    b: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    hash_elements(cs, &[a.clone(), b.clone()])
}

/// In-circuit Poseidon over the shared parameter set; must agree with the
/// native `zkgr_common::poseidon_hash` for every input length used here.
pub fn hash_elements(
    cs: ConstraintSystemRef<Fr>,
    inputs: &[FpVar<Fr>],
) -> Result<FpVar<Fr>, SynthesisError> {
    let mut sponge = PoseidonSpongeVar::new(cs, &POSEIDON_CONFIG);
    for input in inputs {
        sponge.absorb(input)?;
    }
    Ok(sponge.squeeze_field_elements(1)?.remove(0))
}
