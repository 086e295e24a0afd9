// zkgr/zkgr-prover/src/lib.rs

use ark_bn254::Bn254;
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::SynthesisError;
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use zkgr_circuit::{gadgets::recovery::RecoveryWitness, GuardianCircuit, GuardianCircuitInput};
use zkgr_common::{
    decode_recovery_message,
    eddsa::{GuardianSigningKey, KeyError},
    guardian_commitment, serialize_proof, EncodingError, ProofBundle, RecoverySignals,
    MESSAGE_LEN,
};

pub struct ProverKeys {
    pub pk: ProvingKey<Bn254>,
    pub vk: VerifyingKey<Bn254>,
}

#[derive(Debug, Error)]
pub enum ProverError {
    /// Malformed message or key material, caught before any synthesis.
    #[error("malformed witness: {0}")]
    Witness(#[from] EncodingError),
    #[error("malformed witness: {0}")]
    Key(#[from] KeyError),
    #[error("proof synthesis failed: {0}")]
    Synthesis(SynthesisError),
    #[error("failed to serialize proof: {0}")]
    Serialization(String),
}

/// Circuit-specific Groth16 key generation.
pub fn setup(rng: &mut (impl RngCore + CryptoRng)) -> Result<ProverKeys, ProverError> {
    let (pk, vk) = Groth16::<Bn254>::setup(GuardianCircuit::keygen(), rng)
        .map_err(ProverError::Synthesis)?;
    Ok(ProverKeys { pk, vk })
}

/// Prove a fully-assembled circuit input.
///
/// Groth16 proving is randomized: identical witnesses produce distinct,
/// equally-valid proofs on every call.
pub fn prove(
    pk: &ProvingKey<Bn254>,
    input: GuardianCircuitInput,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Proof<Bn254>, ProverError> {
    Groth16::<Bn254>::prove(pk, GuardianCircuit::new(Some(input)), rng)
        .map_err(ProverError::Synthesis)
}

/// Sign `message` with `signing_key` and prove the confirmation.
///
/// The message is validated against the wire contract first; a wrong length
/// or nonzero padding is a [`ProverError::Witness`], fatal to this attempt
/// only.
pub fn generate_proof(
    message: &[u8],
    signing_key: &GuardianSigningKey,
    pk: &ProvingKey<Bn254>,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<(Proof<Bn254>, RecoverySignals), ProverError> {
    let (increment, address) = decode_recovery_message(message)?;
    let mut fixed = [0u8; MESSAGE_LEN];
    fixed.copy_from_slice(message);

    let public_key = signing_key.public_key();
    let signals = RecoverySignals {
        hash_public_key: guardian_commitment(&public_key),
        increment,
        address,
    };
    let input = GuardianCircuitInput {
        witness: RecoveryWitness {
            public_key,
            signature: signing_key.sign(&fixed),
            message: fixed,
        },
        public: signals,
    };

    let proof = prove(pk, input, rng)?;
    Ok((proof, signals))
}

pub fn prove_bundle(
    message: &[u8],
    signing_key: &GuardianSigningKey,
    pk: &ProvingKey<Bn254>,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<ProofBundle, ProverError> {
    let (proof, signals) = generate_proof(message, signing_key, pk, rng)?;
    let bytes = serialize_proof(&proof).map_err(|e| ProverError::Serialization(e.to_string()))?;
    Ok(ProofBundle::new(bytes, signals))
}
