// zkgr/zkgr-circuit/src/gadgets/message.rs
//
// The in-circuit half of the recovery-message wire contract. The off-chain
// encoder lives in `zkgr_common::encode_recovery_message`; the two must stay
// bit-exact (LSB-first within each byte, big-endian increment first, zero
// pad, big-endian address last) or verification fails with no other symptom.

use ark_bn254::Fr;
use ark_r1cs_std::{boolean::Boolean, eq::EqGadget, fields::fp::FpVar, ToBitsGadget};
use ark_relations::r1cs::SynthesisError;

use zkgr_common::{ADDRESS_LEN, INCREMENT_LEN, MESSAGE_BITS, MESSAGE_LEN};

pub const INCREMENT_BITS: usize = 8 * INCREMENT_LEN;
pub const ADDRESS_BITS: usize = 8 * ADDRESS_LEN;

const ADDRESS_SLOT_START: usize = MESSAGE_LEN - ADDRESS_LEN;

/// Constrain the witnessed message bits to equal the canonical encoding of
/// the public `(increment, address)` pair.
pub fn enforce_message_encoding(
    msg: &[Boolean<Fr>],
    increment: &FpVar<Fr>,
    address: &FpVar<Fr>,
) -> Result<(), SynthesisError> {
    debug_assert_eq!(msg.len(), MESSAGE_BITS);

    let increment_bits = fits_in_bits(increment, INCREMENT_BITS)?;
    let address_bits = fits_in_bits(address, ADDRESS_BITS)?;

    // Bytes 0..8: big-endian increment.
    for i in 0..INCREMENT_LEN {
        for j in 0..8 {
            msg[8 * i + j].enforce_equal(&increment_bits[8 * (INCREMENT_LEN - 1 - i) + j])?;
        }
    }
    // Bytes 8..12: the address slot's zero padding.
    for k in (8 * INCREMENT_LEN)..(8 * ADDRESS_SLOT_START) {
        msg[k].enforce_equal(&Boolean::constant(false))?;
    }
    // Bytes 12..32: big-endian address.
    for i in ADDRESS_SLOT_START..MESSAGE_LEN {
        for j in 0..8 {
            msg[8 * i + j].enforce_equal(&address_bits[8 * (MESSAGE_LEN - 1 - i) + j])?;
        }
    }
    Ok(())
}

/// Canonical bit decomposition of a field element, with every bit at or above
/// `width` pinned to zero. This is what makes the public `increment` and
/// `address` range-bounded (64 and 160 bits respectively).
pub fn fits_in_bits(value: &FpVar<Fr>, width: usize) -> Result<Vec<Boolean<Fr>>, SynthesisError> {
    let bits = value.to_bits_le()?;
    for bit in &bits[width..] {
        bit.enforce_equal(&Boolean::constant(false))?;
    }
    Ok(bits[..width].to_vec())
}
