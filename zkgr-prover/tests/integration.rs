use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};

use zkgr_common::{
    eddsa::GuardianSigningKey, encode_recovery_message, generate_calldata, Address,
};
use zkgr_prover::{generate_proof, setup, ProverError, ProverKeys};
use zkgr_verifier::{prepare, verify, verify_calldata};

static KEYS: Lazy<ProverKeys> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(1234);
    setup(&mut rng).expect("setup")
});

fn rng() -> StdRng {
    StdRng::seed_from_u64(5678)
}

fn guardian() -> GuardianSigningKey {
    GuardianSigningKey::from_seed(&[0x11; 32]).unwrap()
}

fn candidate() -> Address {
    "0x019b4ee7ad22ffd4c215e5f424faf4c75577dc36".parse().unwrap()
}

#[test]
fn prove_and_verify_round_trip() {
    let message = encode_recovery_message(0, &candidate());
    let (proof, signals) = generate_proof(&message, &guardian(), &KEYS.pk, &mut rng()).unwrap();

    assert!(verify(&KEYS.vk, &proof, &signals));

    // The same proof is bound to its signals.
    let mut stale = signals;
    stale.increment += 1;
    assert!(!verify(&KEYS.vk, &proof, &stale));

    let mut hijacked = signals;
    hijacked.address = Address([0x99; 20]);
    assert!(!verify(&KEYS.vk, &proof, &hijacked));
}

#[test]
fn calldata_round_trip_reaches_the_onchain_verifier() {
    let message = encode_recovery_message(7, &candidate());
    let (proof, signals) = generate_proof(&message, &guardian(), &KEYS.pk, &mut rng()).unwrap();
    let pvk = prepare(&KEYS.vk);

    let calldata = generate_calldata(&proof, &signals).unwrap();
    let (ok, parsed) = verify_calldata(&pvk, &calldata).unwrap();
    assert!(ok);
    assert_eq!(parsed, signals);

    // A well-formed calldata tuple carrying the wrong commitment word stays
    // structurally valid but fails cryptographically.
    let mut tampered = calldata;
    tampered.pub_signals[0].0[31] ^= 1;
    if let Ok((ok, _)) = verify_calldata(&pvk, &tampered) {
        assert!(!ok);
    }
}

#[test]
fn malformed_message_is_a_witness_error() {
    let result = generate_proof(&[0u8; 31], &guardian(), &KEYS.pk, &mut rng());
    assert!(matches!(result, Err(ProverError::Witness(_))));

    let mut padded = encode_recovery_message(0, &candidate());
    padded[8] = 1;
    let result = generate_proof(&padded, &guardian(), &KEYS.pk, &mut rng());
    assert!(matches!(result, Err(ProverError::Witness(_))));
}
