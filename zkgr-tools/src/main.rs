// zkgr/zkgr-tools/src/main.rs

use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::OsRng;
use serde::Serialize;

use zkgr_common::{
    deserialize_proof, hash_bytes_hex, load_verifier_artifacts, read_manifest,
    serialize_proving_key, serialize_verifying_key, write_manifest, ArtifactFile,
    ArtifactManifest, ProofBundle, CIRCUIT_VERSION, MANIFEST_VERSION,
};
use zkgr_prover::setup;

const DEFAULT_OUTPUT_DIR: &str = "artifacts/local";
const DEFAULT_MANIFEST_PATH: &str = "artifacts/local/manifest.json";
const VK_FILENAME: &str = "vk.bin";
const PK_FILENAME: &str = "pk.bin";

#[derive(Parser)]
#[command(
    name = "zkgr-tools",
    about = "Utility commands for guardian-recovery circuit artifacts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate vk/pk and a manifest for the guardian circuit.
    GenParams(GenParamsArgs),
    /// Print metadata about the verifying key recorded in a manifest.
    DumpVk(DumpArgs),
    /// Verify a proof bundle against the manifest's verifying key.
    VerifyBundle(VerifyBundleArgs),
}

#[derive(Args)]
struct GenParamsArgs {
    /// Output directory for artifacts.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

#[derive(Args)]
struct DumpArgs {
    #[arg(long, default_value = DEFAULT_MANIFEST_PATH)]
    manifest: PathBuf,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct VerifyBundleArgs {
    #[arg(long, default_value = DEFAULT_MANIFEST_PATH)]
    manifest: PathBuf,
    /// Proof bundle JSON produced by zkgr-prover.
    #[arg(long)]
    bundle: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::GenParams(args) => gen_params(args),
        Commands::DumpVk(args) => dump_vk(args),
        Commands::VerifyBundle(args) => verify_bundle(args),
    }
}

fn gen_params(args: GenParamsArgs) -> Result<()> {
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    println!("Generating guardian circuit artifacts...");
    println!("This may take a few minutes...");

    let keys = setup(&mut OsRng).context("key generation failed")?;
    let vk_bytes = serialize_verifying_key(&keys.vk)?;
    let pk_bytes = serialize_proving_key(&keys.pk)?;

    write_binary(args.output_dir.join(VK_FILENAME), &vk_bytes)?;
    write_binary(args.output_dir.join(PK_FILENAME), &pk_bytes)?;

    let manifest = ArtifactManifest {
        manifest_version: MANIFEST_VERSION,
        circuit_version: CIRCUIT_VERSION,
        created_at_unix: unix_now(),
        vk: ArtifactFile::from_bytes(VK_FILENAME, &vk_bytes),
        pk: ArtifactFile::from_bytes(PK_FILENAME, &pk_bytes),
    };
    let manifest_path = args.output_dir.join(zkgr_common::MANIFEST_FILE);
    write_manifest(&manifest_path, &manifest)?;

    println!("Wrote {}", manifest_path.display());
    println!("  vk: {} bytes ({})", manifest.vk.size, manifest.vk.blake3);
    println!("  pk: {} bytes ({})", manifest.pk.size, manifest.pk.blake3);
    Ok(())
}

#[derive(Serialize)]
struct VkSummary {
    circuit_version: u32,
    created_at_unix: u64,
    path: String,
    size: u64,
    blake3: String,
}

fn dump_vk(args: DumpArgs) -> Result<()> {
    let manifest = read_manifest(&args.manifest)
        .with_context(|| format!("failed to read {}", args.manifest.display()))?;
    let summary = VkSummary {
        circuit_version: manifest.circuit_version,
        created_at_unix: manifest.created_at_unix,
        path: manifest.vk.path.clone(),
        size: manifest.vk.size,
        blake3: manifest.vk.blake3.clone(),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("circuit_version: {}", summary.circuit_version);
        println!("created_at_unix: {}", summary.created_at_unix);
        println!("vk path: {}", summary.path);
        println!("vk size: {} bytes", summary.size);
        println!("vk blake3: {}", summary.blake3);
    }
    Ok(())
}

fn verify_bundle(args: VerifyBundleArgs) -> Result<()> {
    let artifacts = load_verifier_artifacts(&args.manifest)
        .with_context(|| format!("failed to load manifest {}", args.manifest.display()))?;

    let json = fs::read_to_string(&args.bundle)
        .with_context(|| format!("failed to read {}", args.bundle.display()))?;
    let bundle: ProofBundle =
        serde_json::from_str(&json).context("failed to parse proof bundle json")?;
    anyhow::ensure!(
        bundle.circuit_version == artifacts.manifest.circuit_version,
        "bundle circuit version {} does not match manifest {}",
        bundle.circuit_version,
        artifacts.manifest.circuit_version
    );

    let proof = deserialize_proof(&bundle.proof)?;
    let verified = zkgr_verifier::verify(&artifacts.vk, &proof, &bundle.public_signals);
    println!("verified: {verified}");
    println!("proof blake3: {}", hash_bytes_hex(&bundle.proof));
    if !verified {
        std::process::exit(1);
    }
    Ok(())
}

fn write_binary(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    fs::write(path.as_ref(), bytes)
        .with_context(|| format!("failed to write {}", path.as_ref().display()))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
