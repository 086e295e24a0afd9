// zkgr/zkgr-circuit/src/gadgets/recovery.rs

use zkgr_common::eddsa::{GuardianPublicKey, GuardianSignature};
use zkgr_common::MESSAGE_LEN;

/// Private witness of one guardian confirmation: the guardian's key, their
/// signature, and the exact message bytes they signed.
#[derive(Clone, Debug)]
pub struct RecoveryWitness {
    pub public_key: GuardianPublicKey,
    pub signature: GuardianSignature,
    pub message: [u8; MESSAGE_LEN],
}
