// zkgr/zkgr-registry/src/account.rs

use sha3::{Digest, Keccak256};
use thiserror::Error;

use zkgr_common::Address;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("caller is not the account's sanctioned guardian path")]
    UnauthorizedMutation,
}

/// The account contract, seen through the only surface the registry touches:
/// reading the owner and the sanctioned owner-mutation path. Call forwarding
/// and entry-point validation stay outside this crate.
pub trait AccountOps {
    fn owner(&self) -> Address;

    /// The owner-mutation entry point, callable only by the account's
    /// registered guardian contract.
    fn change_owner(&mut self, new_owner: Address) -> Result<(), AccountError>;
}

/// Deterministic per-owner account addressing, as exposed by the factory.
pub trait AccountDirectory {
    /// The deployed account for `owner`, if one exists.
    fn account_of(&self, owner: &Address) -> Option<Address>;

    /// Re-map a deployed account from `old_owner` to `new_owner` after a
    /// completed recovery.
    fn reassign(&mut self, old_owner: &Address, new_owner: &Address);
}

/// CREATE2-style deterministic guardian-contract address:
/// `keccak256(0xff ++ deployer ++ salt ++ keccak256(bytecode))[12..]`.
pub fn compute_guardian_address(deployer: &Address, salt: &[u8; 32], bytecode: &[u8]) -> Address {
    let code_hash = Keccak256::digest(bytecode);
    let mut material = Vec::with_capacity(1 + 20 + 32 + 32);
    material.push(0xff);
    material.extend_from_slice(&deployer.0);
    material.extend_from_slice(salt);
    material.extend_from_slice(&code_hash);
    Address::from_keccak(&material)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guardian_address_is_deterministic() {
        let deployer = Address([0xAB; 20]);
        let a = compute_guardian_address(&deployer, &[0u8; 32], b"guardian-v1");
        let b = compute_guardian_address(&deployer, &[0u8; 32], b"guardian-v1");
        assert_eq!(a, b);
    }

    #[test]
    fn guardian_address_depends_on_salt_and_code() {
        let deployer = Address([0xAB; 20]);
        let base = compute_guardian_address(&deployer, &[0u8; 32], b"guardian-v1");
        assert_ne!(
            base,
            compute_guardian_address(&deployer, &[1u8; 32], b"guardian-v1")
        );
        assert_ne!(
            base,
            compute_guardian_address(&deployer, &[0u8; 32], b"guardian-v2")
        );
    }
}
