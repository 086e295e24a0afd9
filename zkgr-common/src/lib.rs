// zkgr/zkgr-common/src/lib.rs

pub mod eddsa;

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{anyhow, ensure, Context, Result};
use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_crypto_primitives::sponge::{
    poseidon::{find_poseidon_ark_and_mds, PoseidonConfig, PoseidonSponge},
    CryptographicSponge, FieldBasedCryptographicSponge,
};
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField};
use ark_groth16::{Proof, ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use thiserror::Error;

use crate::eddsa::GuardianPublicKey;

/// Number of public signals carried by a recovery proof:
/// `[hash_public_key, increment, address]`.
pub const PUBLIC_INPUT_COUNT: usize = 3;

pub const CIRCUIT_VERSION: u32 = 1;
pub const MANIFEST_VERSION: u32 = 1;
pub const MANIFEST_FILE: &str = "manifest.json";

const POSEIDON_RATE: usize = 2;
const POSEIDON_CAPACITY: usize = 1;
const POSEIDON_FULL_ROUNDS: usize = 8;
const POSEIDON_PARTIAL_ROUNDS: usize = 57;
const POSEIDON_ALPHA: u64 = 5;

/// Shared Poseidon parameter set.
///
/// The same configuration backs the native hash, the EdDSA challenge, and the
/// in-circuit sponge gadget; the hashes must agree bit-exactly or proofs for
/// honestly-signed messages stop verifying.
pub static POSEIDON_CONFIG: Lazy<PoseidonConfig<Fr>> = Lazy::new(|| {
    let (ark, mds) = find_poseidon_ark_and_mds::<Fr>(
        Fr::MODULUS_BIT_SIZE as u64,
        POSEIDON_RATE,
        POSEIDON_FULL_ROUNDS as u64,
        POSEIDON_PARTIAL_ROUNDS as u64,
        0,
    );
    PoseidonConfig::new(
        POSEIDON_FULL_ROUNDS,
        POSEIDON_PARTIAL_ROUNDS,
        POSEIDON_ALPHA,
        mds,
        ark,
        POSEIDON_RATE,
        POSEIDON_CAPACITY,
    )
});

pub fn poseidon_hash(inputs: &[Fr]) -> Fr {
    let mut sponge = PoseidonSponge::new(&*POSEIDON_CONFIG);
    for input in inputs {
        sponge.absorb(input);
    }
    sponge.squeeze_native_field_elements(1)[0]
}

/// Commitment registered on-chain for a guardian: Poseidon over the affine
/// coordinates of the guardian's signing public key. Neither the key nor any
/// guardian address ever appears in registry state.
pub fn guardian_commitment(public_key: &GuardianPublicKey) -> Fr {
    let (x, y) = public_key.coordinates();
    poseidon_hash(&[x, y])
}

// ============================================================
// Addresses
// ============================================================

pub const ADDRESS_LEN: usize = 20;

/// 20-byte account address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// Last 20 bytes of Keccak-256 over `material`.
    pub fn from_keccak(material: &[u8]) -> Self {
        let digest = Keccak256::digest(material);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[12..]);
        Address(bytes)
    }

    /// Big-endian embedding into the scalar field (fits: 160 < 254 bits).
    pub fn to_fr(&self) -> Fr {
        Fr::from_be_bytes_mod_order(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| EncodingError::BadAddress)?;
        if bytes.len() != ADDRESS_LEN {
            return Err(EncodingError::BadAddress);
        }
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&bytes);
        Ok(Address(out))
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================
// Recovery message wire contract
// ============================================================
//
// A guardian signs exactly these 32 bytes to authorize an owner change:
//
//   bytes  0..8   big-endian increment (the registry's replay counter)
//   bytes  8..12  zero padding (the address slot is a fixed 24-byte field)
//   bytes 12..32  big-endian 20-byte candidate owner address
//
// Circuit consumption decomposes the message into 256 bits, least-significant
// bit first within each byte, bytes in order. Both sides of this contract are
// tested explicitly; a mismatch fails verification with no other symptom.

pub const MESSAGE_LEN: usize = 32;
pub const MESSAGE_BITS: usize = 8 * MESSAGE_LEN;
pub const INCREMENT_LEN: usize = 8;
const ADDRESS_SLOT_START: usize = MESSAGE_LEN - ADDRESS_LEN;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("recovery message must be {MESSAGE_LEN} bytes, got {0}")]
    BadLength(usize),
    #[error("recovery message padding bytes must be zero")]
    NonZeroPadding,
    #[error("address must be 20 hex-encoded bytes")]
    BadAddress,
}

/// Encode `(increment, address)` into the signed recovery message.
/// The address is zero-padded, never truncated.
pub fn encode_recovery_message(increment: u64, address: &Address) -> [u8; MESSAGE_LEN] {
    let mut message = [0u8; MESSAGE_LEN];
    message[..INCREMENT_LEN].copy_from_slice(&increment.to_be_bytes());
    message[ADDRESS_SLOT_START..].copy_from_slice(&address.0);
    message
}

/// Decode and validate a recovery message. Rejects wrong lengths and nonzero
/// padding so that `decode(encode(i, a)) == (i, a)` is the full story.
pub fn decode_recovery_message(message: &[u8]) -> Result<(u64, Address), EncodingError> {
    if message.len() != MESSAGE_LEN {
        return Err(EncodingError::BadLength(message.len()));
    }
    if message[INCREMENT_LEN..ADDRESS_SLOT_START]
        .iter()
        .any(|byte| *byte != 0)
    {
        return Err(EncodingError::NonZeroPadding);
    }
    let mut increment_bytes = [0u8; INCREMENT_LEN];
    increment_bytes.copy_from_slice(&message[..INCREMENT_LEN]);
    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&message[ADDRESS_SLOT_START..]);
    Ok((u64::from_be_bytes(increment_bytes), Address(address)))
}

/// Bit decomposition for circuit consumption: LSB-first per byte, bytes in
/// order.
pub fn message_bits(message: &[u8; MESSAGE_LEN]) -> [bool; MESSAGE_BITS] {
    let mut bits = [false; MESSAGE_BITS];
    for (i, byte) in message.iter().enumerate() {
        for j in 0..8 {
            bits[8 * i + j] = (byte >> j) & 1 == 1;
        }
    }
    bits
}

/// The message split into two 128-bit field elements (low half, high half),
/// matching the weights the circuit assigns when recomposing its message bits.
/// Both halves stay well below the field modulus, so no reduction occurs.
pub fn message_halves(message: &[u8; MESSAGE_LEN]) -> (Fr, Fr) {
    let low = Fr::from_le_bytes_mod_order(&message[..MESSAGE_LEN / 2]);
    let high = Fr::from_le_bytes_mod_order(&message[MESSAGE_LEN / 2..]);
    (low, high)
}

// ============================================================
// Field element conversions
// ============================================================

pub fn fr_to_bytes(fr: &Fr) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&fr.into_bigint().to_bytes_le());
    bytes
}

pub fn fr_from_bytes(bytes: &[u8; 32]) -> Result<Fr> {
    Fr::deserialize_compressed(&bytes[..]).map_err(|_| anyhow!("invalid bn254 scalar encoding"))
}

pub fn fr_to_u64(fr: &Fr) -> Result<u64> {
    let bytes = fr.into_bigint().to_bytes_le();
    ensure!(
        bytes[8..].iter().all(|&b| b == 0),
        "field element does not fit in u64"
    );
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    Ok(u64::from_le_bytes(buf))
}

pub fn fr_to_address(fr: &Fr) -> Result<Address> {
    let bytes = fr.into_bigint().to_bytes_le();
    ensure!(
        bytes[ADDRESS_LEN..].iter().all(|&b| b == 0),
        "field element does not fit in 160 bits"
    );
    let mut address = [0u8; ADDRESS_LEN];
    for (dst, src) in address.iter_mut().zip(bytes[..ADDRESS_LEN].iter().rev()) {
        *dst = *src;
    }
    Ok(Address(address))
}

// ============================================================
// Public signals and proof bundle
// ============================================================

/// Verifier-facing public signals of a recovery proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverySignals {
    /// Poseidon commitment of the confirming guardian's public key.
    #[serde(with = "serde_fr_hex")]
    pub hash_public_key: Fr,
    /// Replay counter the proof was generated against.
    pub increment: u64,
    /// Candidate owner the guardian signed for.
    pub address: Address,
}

impl RecoverySignals {
    /// Instance vector in circuit order.
    pub fn to_field_elements(&self) -> [Fr; PUBLIC_INPUT_COUNT] {
        [
            self.hash_public_key,
            Fr::from(self.increment),
            self.address.to_fr(),
        ]
    }

    /// Rebuild signals from raw instances, re-checking the integer bounds the
    /// circuit enforces.
    pub fn from_field_elements(elements: &[Fr]) -> Result<Self> {
        ensure!(
            elements.len() == PUBLIC_INPUT_COUNT,
            "expected {} public signals, got {}",
            PUBLIC_INPUT_COUNT,
            elements.len()
        );
        Ok(Self {
            hash_public_key: elements[0],
            increment: fr_to_u64(&elements[1]).context("increment signal")?,
            address: fr_to_address(&elements[2]).context("address signal")?,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProofBundle {
    pub circuit_version: u32,
    #[serde(with = "serde_bytes_hex")]
    pub proof: Vec<u8>,
    pub public_signals: RecoverySignals,
}

impl ProofBundle {
    pub fn new(proof: Vec<u8>, public_signals: RecoverySignals) -> Self {
        Self {
            circuit_version: CIRCUIT_VERSION,
            proof,
            public_signals,
        }
    }
}

// ============================================================
// Groth16 key / proof serialization
// ============================================================

pub fn serialize_proof(proof: &Proof<Bn254>) -> Result<Vec<u8>> {
    let mut buf = vec![];
    proof
        .serialize_compressed(&mut buf)
        .context("failed to serialize proof")?;
    Ok(buf)
}

pub fn deserialize_proof(bytes: &[u8]) -> Result<Proof<Bn254>> {
    Proof::deserialize_compressed(bytes).context("failed to deserialize proof")
}

pub fn serialize_verifying_key(vk: &VerifyingKey<Bn254>) -> Result<Vec<u8>> {
    let mut buf = vec![];
    vk.serialize_compressed(&mut buf)
        .context("failed to serialize verifying key")?;
    Ok(buf)
}

pub fn deserialize_verifying_key(bytes: &[u8]) -> Result<VerifyingKey<Bn254>> {
    VerifyingKey::deserialize_compressed(bytes).context("failed to deserialize verifying key")
}

pub fn serialize_proving_key(pk: &ProvingKey<Bn254>) -> Result<Vec<u8>> {
    let mut buf = vec![];
    pk.serialize_compressed(&mut buf)
        .context("failed to serialize proving key")?;
    Ok(buf)
}

pub fn deserialize_proving_key(bytes: &[u8]) -> Result<ProvingKey<Bn254>> {
    ProvingKey::deserialize_compressed(bytes).context("failed to deserialize proving key")
}

// ============================================================
// On-chain calldata rendering
// ============================================================

/// Big-endian 256-bit word, the unit of on-chain calldata.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct U256(pub [u8; 32]);

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for U256 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let stripped = s.strip_prefix("0x").unwrap_or(&s);
        if stripped.len() != 64 {
            return Err(serde::de::Error::custom("expected 64 hex chars"));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(stripped, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(U256(bytes))
    }
}

/// The exact argument tuple the on-chain verifier accepts:
/// `verifyProof(pA, pB, pC, pubSignals)`. `p_b` limbs are ordered imaginary
/// component first, matching the pairing-precompile convention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Groth16Calldata {
    pub p_a: [U256; 2],
    pub p_b: [[U256; 2]; 2],
    pub p_c: [U256; 2],
    pub pub_signals: [U256; PUBLIC_INPUT_COUNT],
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CalldataError {
    #[error("proof point at infinity is not representable in calldata")]
    PointAtInfinity,
    #[error("coordinate is not a canonical base-field encoding")]
    NonCanonicalCoordinate,
    #[error("public signal is not a canonical scalar encoding")]
    NonCanonicalSignal,
    #[error("proof point is not on the curve")]
    PointNotOnCurve,
    #[error("proof point is not in the prime-order subgroup")]
    PointNotInSubgroup,
    #[error("public signals out of range: {0}")]
    SignalOutOfRange(&'static str),
}

/// Lossless transform from a proof and its signals into on-chain call
/// arguments. `parse_calldata` inverts it exactly, so local verifier
/// acceptance carries over to the on-chain call unchanged.
pub fn generate_calldata(
    proof: &Proof<Bn254>,
    signals: &RecoverySignals,
) -> Result<Groth16Calldata, CalldataError> {
    let (ax, ay) = proof.a.xy().ok_or(CalldataError::PointAtInfinity)?;
    let (bx, by) = proof.b.xy().ok_or(CalldataError::PointAtInfinity)?;
    let (cx, cy) = proof.c.xy().ok_or(CalldataError::PointAtInfinity)?;

    let pub_signals = signals.to_field_elements().map(|fr| fr_to_u256(&fr));

    Ok(Groth16Calldata {
        p_a: [fq_to_u256(ax), fq_to_u256(ay)],
        p_b: [
            [fq_to_u256(&bx.c1), fq_to_u256(&bx.c0)],
            [fq_to_u256(&by.c1), fq_to_u256(&by.c0)],
        ],
        p_c: [fq_to_u256(cx), fq_to_u256(cy)],
        pub_signals,
    })
}

/// Reconstruct the proof and signals from calldata. Strict: non-canonical
/// encodings, off-curve points, and wrong-subgroup points are rejected rather
/// than silently reduced.
pub fn parse_calldata(
    calldata: &Groth16Calldata,
) -> Result<(Proof<Bn254>, RecoverySignals), CalldataError> {
    let a = g1_from_words(&calldata.p_a)?;
    let b = g2_from_words(&calldata.p_b)?;
    let c = g1_from_words(&calldata.p_c)?;

    let mut elements = [Fr::default(); PUBLIC_INPUT_COUNT];
    for (element, word) in elements.iter_mut().zip(calldata.pub_signals.iter()) {
        *element = fr_from_u256(word)?;
    }
    let signals = RecoverySignals::from_field_elements(&elements)
        .map_err(|_| CalldataError::SignalOutOfRange("increment or address"))?;

    Ok((Proof { a, b, c }, signals))
}

fn fq_to_u256(fq: &Fq) -> U256 {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&fq.into_bigint().to_bytes_be());
    U256(bytes)
}

fn fr_to_u256(fr: &Fr) -> U256 {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&fr.into_bigint().to_bytes_be());
    U256(bytes)
}

fn fq_from_u256(word: &U256) -> Result<Fq, CalldataError> {
    let fq = Fq::from_be_bytes_mod_order(&word.0);
    if fq_to_u256(&fq) != *word {
        return Err(CalldataError::NonCanonicalCoordinate);
    }
    Ok(fq)
}

fn fr_from_u256(word: &U256) -> Result<Fr, CalldataError> {
    let fr = Fr::from_be_bytes_mod_order(&word.0);
    if fr_to_u256(&fr) != *word {
        return Err(CalldataError::NonCanonicalSignal);
    }
    Ok(fr)
}

fn g1_from_words(words: &[U256; 2]) -> Result<G1Affine, CalldataError> {
    let point = G1Affine::new_unchecked(fq_from_u256(&words[0])?, fq_from_u256(&words[1])?);
    check_point(point.is_on_curve(), point.is_in_correct_subgroup_assuming_on_curve())?;
    Ok(point)
}

fn g2_from_words(words: &[[U256; 2]; 2]) -> Result<G2Affine, CalldataError> {
    let x = Fq2::new(fq_from_u256(&words[0][1])?, fq_from_u256(&words[0][0])?);
    let y = Fq2::new(fq_from_u256(&words[1][1])?, fq_from_u256(&words[1][0])?);
    let point = G2Affine::new_unchecked(x, y);
    check_point(point.is_on_curve(), point.is_in_correct_subgroup_assuming_on_curve())?;
    Ok(point)
}

fn check_point(on_curve: bool, in_subgroup: bool) -> Result<(), CalldataError> {
    if !on_curve {
        return Err(CalldataError::PointNotOnCurve);
    }
    if !in_subgroup {
        return Err(CalldataError::PointNotInSubgroup);
    }
    Ok(())
}

// ============================================================
// Artifact manifest
// ============================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub path: String,
    pub blake3: String,
    pub size: u64,
}

impl ArtifactFile {
    pub fn from_bytes(path: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            path: path.into(),
            blake3: hash_bytes_hex(bytes),
            size: bytes.len() as u64,
        }
    }

    fn resolve_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.path)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub manifest_version: u32,
    pub circuit_version: u32,
    pub created_at_unix: u64,
    pub vk: ArtifactFile,
    pub pk: ArtifactFile,
}

#[derive(Clone, Debug)]
pub struct VerifierArtifacts {
    pub manifest: ArtifactManifest,
    pub vk_bytes: Vec<u8>,
    pub vk: VerifyingKey<Bn254>,
}

#[derive(Clone, Debug)]
pub struct ProverArtifacts {
    pub manifest: ArtifactManifest,
    pub vk_bytes: Vec<u8>,
    pub pk_bytes: Vec<u8>,
    pub vk: VerifyingKey<Bn254>,
    pub pk: ProvingKey<Bn254>,
}

pub fn write_manifest(path: impl AsRef<Path>, manifest: &ArtifactManifest) -> Result<()> {
    let json = serde_json::to_vec_pretty(manifest).context("failed to serialize manifest")?;
    fs::write(path.as_ref(), json).context("failed to write manifest")
}

pub fn read_manifest(path: impl AsRef<Path>) -> Result<ArtifactManifest> {
    let bytes = fs::read(path.as_ref()).context("failed to read manifest file")?;
    serde_json::from_slice(&bytes).context("failed to parse manifest json")
}

pub fn load_verifier_artifacts(path: impl AsRef<Path>) -> Result<VerifierArtifacts> {
    let manifest_path = path.as_ref();
    let manifest = read_manifest(manifest_path)?;
    ensure_manifest_compat(&manifest)?;
    let base_dir = manifest_dir(manifest_path);

    let vk_bytes = read_artifact_file(&base_dir, &manifest.vk, "verifying key")?;
    let vk = deserialize_verifying_key(&vk_bytes)?;

    Ok(VerifierArtifacts {
        manifest,
        vk_bytes,
        vk,
    })
}

pub fn load_prover_artifacts(path: impl AsRef<Path>) -> Result<ProverArtifacts> {
    let manifest_path = path.as_ref();
    let manifest = read_manifest(manifest_path)?;
    ensure_manifest_compat(&manifest)?;
    let base_dir = manifest_dir(manifest_path);

    let vk_bytes = read_artifact_file(&base_dir, &manifest.vk, "verifying key")?;
    let pk_bytes = read_artifact_file(&base_dir, &manifest.pk, "proving key")?;
    let vk = deserialize_verifying_key(&vk_bytes)?;
    let pk = deserialize_proving_key(&pk_bytes)?;

    Ok(ProverArtifacts {
        manifest,
        vk_bytes,
        pk_bytes,
        vk,
        pk,
    })
}

pub fn hash_bytes_hex(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

fn read_artifact_file(base_dir: &Path, entry: &ArtifactFile, label: &str) -> Result<Vec<u8>> {
    let path = entry.resolve_path(base_dir);
    let bytes = fs::read(&path)
        .with_context(|| format!("failed to read {} at {}", label, path.display()))?;
    ensure!(
        bytes.len() as u64 == entry.size,
        "{} size mismatch, manifest recorded {} bytes but found {}",
        label,
        entry.size,
        bytes.len(),
    );
    let actual = hash_bytes_hex(&bytes);
    ensure!(
        actual == entry.blake3,
        "{} hash mismatch, expected {} but computed {}",
        label,
        entry.blake3,
        actual
    );
    Ok(bytes)
}

fn manifest_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn ensure_manifest_compat(manifest: &ArtifactManifest) -> Result<()> {
    ensure!(
        manifest.manifest_version == MANIFEST_VERSION,
        "unsupported manifest version {}, expected {}",
        manifest.manifest_version,
        MANIFEST_VERSION
    );
    ensure!(
        manifest.circuit_version == CIRCUIT_VERSION,
        "circuit version mismatch: manifest {} vs crate {}",
        manifest.circuit_version,
        CIRCUIT_VERSION
    );
    Ok(())
}

// ============================================================
// Serde helpers
// ============================================================

/// Serde module for Fr as hex of the little-endian canonical encoding.
pub mod serde_fr_hex {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(fr: &Fr, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(fr_to_bytes(fr))))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Fr, D::Error> {
        let s = String::deserialize(deserializer)?;
        let stripped = s.strip_prefix("0x").unwrap_or(&s);
        if stripped.len() != 64 {
            return Err(de::Error::custom(format!(
                "expected 64 hex chars, got {}",
                stripped.len()
            )));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(stripped, &mut bytes).map_err(de::Error::custom)?;
        fr_from_bytes(&bytes).map_err(de::Error::custom)
    }
}

/// Serde module for opaque byte strings as 0x-prefixed hex.
pub mod serde_bytes_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let stripped = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(stripped).map_err(serde::de::Error::custom)
    }
}
