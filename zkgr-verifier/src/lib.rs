// zkgr/zkgr-verifier/src/lib.rs

use ark_bn254::Bn254;
use ark_groth16::{prepare_verifying_key, Groth16, PreparedVerifyingKey, Proof, VerifyingKey};
use ark_snark::SNARK;

use zkgr_common::{parse_calldata, CalldataError, Groth16Calldata, RecoverySignals};

pub fn prepare(vk: &VerifyingKey<Bn254>) -> PreparedVerifyingKey<Bn254> {
    prepare_verifying_key(vk)
}

/// Pure verification against a fixed verifying key. Returns `false` for any
/// cryptographically invalid proof; it never errors and never mutates state.
pub fn verify(vk: &VerifyingKey<Bn254>, proof: &Proof<Bn254>, signals: &RecoverySignals) -> bool {
    Groth16::<Bn254>::verify(vk, &signals.to_field_elements(), proof).unwrap_or(false)
}

pub fn verify_prepared(
    pvk: &PreparedVerifyingKey<Bn254>,
    proof: &Proof<Bn254>,
    signals: &RecoverySignals,
) -> bool {
    Groth16::<Bn254>::verify_with_processed_vk(pvk, &signals.to_field_elements(), proof)
        .unwrap_or(false)
}

/// Verify on-chain-shaped calldata. Structurally malformed calldata is an
/// error; a well-formed but cryptographically invalid proof is `Ok` with
/// `false`, exactly the split the registry relies on.
pub fn verify_calldata(
    pvk: &PreparedVerifyingKey<Bn254>,
    calldata: &Groth16Calldata,
) -> Result<(bool, RecoverySignals), CalldataError> {
    let (proof, signals) = parse_calldata(calldata)?;
    Ok((verify_prepared(pvk, &proof, &signals), signals))
}
