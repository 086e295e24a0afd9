// zkgr/zkgr-prover/src/main.rs

use std::{fs, path::PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use rand::rngs::OsRng;

use zkgr_common::{
    eddsa::GuardianSigningKey, encode_recovery_message, generate_calldata, load_prover_artifacts,
    serialize_proof, Address, ProofBundle,
};
use zkgr_prover::generate_proof;

#[derive(Parser)]
#[command(name = "zkgr-prover", about = "Generate a guardian recovery proof")]
struct Args {
    /// Hex-encoded 32-byte guardian key seed.
    #[arg(long)]
    key_seed: String,
    /// The registry's current replay counter.
    #[arg(long)]
    increment: u64,
    /// Candidate owner address (0x-prefixed).
    #[arg(long)]
    new_owner: Address,
    #[arg(long, default_value = "artifacts/manifest.json")]
    manifest: PathBuf,
    #[arg(long)]
    output_proof: PathBuf,
    /// Optional path to write a proof bundle (proof + signals + version).
    #[arg(long)]
    bundle_json: Option<PathBuf>,
    /// Optional path to write the on-chain calldata JSON.
    #[arg(long)]
    calldata_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let seed = hex::decode(args.key_seed.trim_start_matches("0x"))
        .context("key seed must be hex-encoded")?;
    ensure!(seed.len() == 32, "key seed must be 32 bytes");
    let signing_key = GuardianSigningKey::from_seed(&seed)?;

    let artifacts = load_prover_artifacts(&args.manifest)
        .with_context(|| format!("failed to load manifest {}", args.manifest.display()))?;

    let message = encode_recovery_message(args.increment, &args.new_owner);
    let (proof, signals) = generate_proof(&message, &signing_key, &artifacts.pk, &mut OsRng)?;

    let proof_bytes = serialize_proof(&proof)?;
    fs::write(&args.output_proof, &proof_bytes)
        .with_context(|| format!("failed to write {}", args.output_proof.display()))?;

    if let Some(path) = args.bundle_json.as_ref() {
        let bundle = ProofBundle::new(proof_bytes.clone(), signals);
        let json = serde_json::to_vec_pretty(&bundle).context("failed to serialize bundle")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    }

    if let Some(path) = args.calldata_json.as_ref() {
        let calldata = generate_calldata(&proof, &signals)?;
        let json = serde_json::to_vec_pretty(&calldata).context("failed to serialize calldata")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
