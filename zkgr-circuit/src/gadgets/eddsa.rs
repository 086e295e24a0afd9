// zkgr/zkgr-circuit/src/gadgets/eddsa.rs

use ark_bn254::Fr;
use ark_ec::AffineRepr;
use ark_ed_on_bn254::{constraints::EdwardsVar, EdwardsAffine, EdwardsProjective};
use ark_ff::{BigInteger, PrimeField};
use ark_r1cs_std::{
    alloc::AllocVar, boolean::Boolean, eq::EqGadget, groups::CurveVar, ToBitsGadget,
};
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use zkgr_common::eddsa::{GuardianPublicKey, GuardianSignature};
use zkgr_common::MESSAGE_BITS;

use crate::gadgets::poseidon;

pub fn allocate_public_key(
    cs: ConstraintSystemRef<Fr>,
    public_key: &GuardianPublicKey,
) -> Result<EdwardsVar, SynthesisError> {
    EdwardsVar::new_witness(cs, || Ok(EdwardsProjective::from(public_key.point())))
}

/// Enforce `S·B == R + c·A` with the Poseidon challenge
/// `c = Poseidon(R.x, R.y, A.x, A.y, m_lo, m_hi)`.
///
/// The challenge is consumed as an unreduced scalar on both the native and
/// the circuit side; `A` lives in the prime-order subgroup, so only
/// `c mod ℓ` matters and no in-circuit scalar-field reduction is needed.
pub fn enforce_signature(
    cs: ConstraintSystemRef<Fr>,
    public_key: &EdwardsVar,
    signature: &GuardianSignature,
    msg: &[Boolean<Fr>],
) -> Result<(), SynthesisError> {
    debug_assert_eq!(msg.len(), MESSAGE_BITS);

    let r = EdwardsVar::new_witness(cs.clone(), || Ok(EdwardsProjective::from(signature.r)))?;
    let s_bits = signature
        .s
        .into_bigint()
        .to_bits_le()
        .into_iter()
        .map(|bit| Boolean::new_witness(cs.clone(), || Ok(bit)))
        .collect::<Result<Vec<_>, _>>()?;

    let m_lo = Boolean::le_bits_to_fp_var(&msg[..MESSAGE_BITS / 2])?;
    let m_hi = Boolean::le_bits_to_fp_var(&msg[MESSAGE_BITS / 2..])?;
    let challenge = poseidon::hash_elements(
        cs,
        &[
            r.x.clone(),
            r.y.clone(),
            public_key.x.clone(),
            public_key.y.clone(),
            m_lo,
            m_hi,
        ],
    )?;
    let challenge_bits = challenge.to_bits_le()?;

    let base = EdwardsVar::constant(EdwardsProjective::from(EdwardsAffine::generator()));
    let lhs = base.scalar_mul_le(s_bits.iter())?;
    let rhs = r + public_key.scalar_mul_le(challenge_bits.iter())?;
    lhs.enforce_equal(&rhs)
}
