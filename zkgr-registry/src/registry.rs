// zkgr/zkgr-registry/src/registry.rs

use std::collections::{HashMap, HashSet};

use ark_bn254::{Bn254, Fr};
use ark_groth16::{PreparedVerifyingKey, VerifyingKey};
use thiserror::Error;

use zkgr_common::{Address, CalldataError, Groth16Calldata};

use crate::account::{AccountDirectory, AccountError, AccountOps};

/// Upper bound on the guardian set, matching the deployed contract's slot
/// layout.
pub const MAX_GUARDIANS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryState {
    Idle,
    PendingRecovery,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("guardian set already initialized")]
    AlreadySetup,
    #[error("guardian set has not been initialized")]
    NotSetup,
    #[error("guardian commitment already registered")]
    DuplicateGuardian,
    #[error("unknown guardian commitment")]
    UnknownGuardian,
    #[error("guardian set is full ({MAX_GUARDIANS} max)")]
    MaxGuardians,
    #[error("threshold {threshold} outside [1, {guardian_count}]")]
    ThresholdOutOfRange { threshold: u64, guardian_count: u64 },
    #[error("candidate owner must be a nonzero address")]
    InvalidCandidate,
    #[error("new owner already has a provisioned account")]
    OwnerAlreadyProvisioned,
    #[error("no recovery is pending")]
    NoPendingRecovery,
    #[error("malformed proof calldata: {0}")]
    Calldata(#[from] CalldataError),
    #[error("invalid recovery proof")]
    InvalidProof,
    #[error("proof was generated against increment {got}, registry is at {expected}")]
    StaleIncrement { expected: u64, got: u64 },
    #[error("proof confirms a different candidate than the pending one")]
    CandidateMismatch,
    #[error("guardian has already confirmed this candidate")]
    AlreadyConfirmed,
    #[error("confirmations below threshold")]
    NotEnoughConfirmations,
    #[error("caller is not the registry owner")]
    NotOwner,
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// On-chain guardian state: an insertion-ordered, bounded set of guardian
/// commitments with a reverse index, the quorum threshold, the replay
/// counter, and the current recovery attempt.
///
/// Guardians exist here only as Poseidon commitments; no address or public
/// key of a guardian is ever stored.
pub struct GuardianRegistry {
    owner: Address,
    account: Address,
    vk: PreparedVerifyingKey<Bn254>,
    guardians: Vec<Fr>,
    guardian_index: HashMap<Fr, usize>,
    threshold: u64,
    delay: u64,
    increment: u64,
    temp_new_owner: Option<Address>,
    confirms: HashSet<Fr>,
    setup: bool,
}

impl GuardianRegistry {
    pub fn new(owner: Address, account: Address, vk: &VerifyingKey<Bn254>) -> Self {
        Self {
            owner,
            account,
            vk: zkgr_verifier::prepare(vk),
            guardians: Vec::new(),
            guardian_index: HashMap::new(),
            threshold: 0,
            delay: 0,
            increment: 0,
            temp_new_owner: None,
            confirms: HashSet::new(),
            setup: false,
        }
    }

    /// One-shot installation of the initial guardian set, threshold, and
    /// administration delay.
    pub fn setup_guardians(
        &mut self,
        caller: Address,
        commitments: &[Fr],
        threshold: u64,
        delay: u64,
    ) -> Result<(), RegistryError> {
        self.ensure_owner(caller)?;
        if self.setup {
            return Err(RegistryError::AlreadySetup);
        }
        if commitments.len() > MAX_GUARDIANS {
            return Err(RegistryError::MaxGuardians);
        }
        check_threshold(threshold, commitments.len() as u64)?;
        let mut seen = HashSet::new();
        for commitment in commitments {
            if !seen.insert(*commitment) {
                return Err(RegistryError::DuplicateGuardian);
            }
        }

        for (index, commitment) in commitments.iter().enumerate() {
            self.guardians.push(*commitment);
            self.guardian_index.insert(*commitment, index);
        }
        self.threshold = threshold;
        self.delay = delay;
        self.setup = true;
        Ok(())
    }

    /// Register an additional guardian commitment. Reachable only through an
    /// executed timelock transaction.
    pub(crate) fn add_guardian(&mut self, commitment: Fr) -> Result<(), RegistryError> {
        if !self.setup {
            return Err(RegistryError::NotSetup);
        }
        if self.guardian_index.contains_key(&commitment) {
            return Err(RegistryError::DuplicateGuardian);
        }
        if self.guardians.len() == MAX_GUARDIANS {
            return Err(RegistryError::MaxGuardians);
        }
        self.guardian_index.insert(commitment, self.guardians.len());
        self.guardians.push(commitment);
        Ok(())
    }

    /// Revoke a guardian commitment. The array stays contiguous in insertion
    /// order and the reverse index is rewritten for every shifted survivor.
    pub(crate) fn remove_guardian(&mut self, commitment: Fr) -> Result<(), RegistryError> {
        if !self.setup {
            return Err(RegistryError::NotSetup);
        }
        let index = *self
            .guardian_index
            .get(&commitment)
            .ok_or(RegistryError::UnknownGuardian)?;
        let remaining = self.guardians.len() as u64 - 1;
        if remaining == 0 {
            // An empty set admits no threshold in [1, guardianCount].
            return Err(RegistryError::ThresholdOutOfRange {
                threshold: self.threshold,
                guardian_count: 0,
            });
        }

        self.guardians.remove(index);
        self.guardian_index.remove(&commitment);
        for (i, survivor) in self.guardians.iter().enumerate().skip(index) {
            self.guardian_index.insert(*survivor, i);
        }
        if self.threshold > remaining {
            self.threshold = remaining;
        }
        self.confirms.remove(&commitment);
        Ok(())
    }

    /// Change the quorum threshold. Reachable only through an executed
    /// timelock transaction.
    pub(crate) fn set_threshold(&mut self, threshold: u64) -> Result<(), RegistryError> {
        if !self.setup {
            return Err(RegistryError::NotSetup);
        }
        check_threshold(threshold, self.guardians.len() as u64)?;
        self.threshold = threshold;
        Ok(())
    }

    /// Propose a candidate owner, opening (or re-targeting) a recovery
    /// attempt. Deliberately unauthenticated: recovery exists for the case
    /// where the owner key is gone, and the guardian quorum is the real gate.
    ///
    /// Re-submitting the pending candidate is a no-op; a different candidate
    /// discards every confirmation accumulated so far. Confirmation sets
    /// never merge across candidates.
    pub fn submit_new_owner(
        &mut self,
        new_owner: Address,
        directory: &impl AccountDirectory,
    ) -> Result<(), RegistryError> {
        if !self.setup {
            return Err(RegistryError::NotSetup);
        }
        if new_owner.is_zero() {
            return Err(RegistryError::InvalidCandidate);
        }
        if directory.account_of(&new_owner).is_some() {
            return Err(RegistryError::OwnerAlreadyProvisioned);
        }
        match self.temp_new_owner {
            Some(pending) if pending == new_owner => {}
            _ => {
                self.temp_new_owner = Some(new_owner);
                self.confirms.clear();
            }
        }
        Ok(())
    }

    /// Record one guardian's confirmation of the pending candidate.
    ///
    /// The proof must verify against the registry's verifying key, carry the
    /// current replay counter, name the pending candidate, and embed a
    /// registered guardian commitment. Each guardian counts once.
    pub fn confirm_change_owner(
        &mut self,
        calldata: &Groth16Calldata,
    ) -> Result<(), RegistryError> {
        let pending = self.temp_new_owner.ok_or(RegistryError::NoPendingRecovery)?;

        let (verified, signals) = zkgr_verifier::verify_calldata(&self.vk, calldata)?;
        if !verified {
            return Err(RegistryError::InvalidProof);
        }
        if signals.increment != self.increment {
            return Err(RegistryError::StaleIncrement {
                expected: self.increment,
                got: signals.increment,
            });
        }
        if signals.address != pending {
            return Err(RegistryError::CandidateMismatch);
        }
        if !self.guardian_index.contains_key(&signals.hash_public_key) {
            return Err(RegistryError::UnknownGuardian);
        }
        if self.confirms.contains(&signals.hash_public_key) {
            return Err(RegistryError::AlreadyConfirmed);
        }

        self.confirms.insert(signals.hash_public_key);
        Ok(())
    }

    pub fn is_enough_confirm(&self) -> bool {
        self.setup && self.confirmed_count() >= self.threshold
    }

    /// Complete the recovery: drive the account's sanctioned owner-mutation
    /// path, clear the attempt, and advance the replay counter so every
    /// consumed proof is dead.
    pub fn change_owner(
        &mut self,
        account: &mut impl AccountOps,
        directory: &mut impl AccountDirectory,
    ) -> Result<Address, RegistryError> {
        let new_owner = self.temp_new_owner.ok_or(RegistryError::NoPendingRecovery)?;
        if !self.is_enough_confirm() {
            return Err(RegistryError::NotEnoughConfirmations);
        }

        account.change_owner(new_owner)?;
        let old_owner = self.owner;
        directory.reassign(&old_owner, &new_owner);

        self.owner = new_owner;
        self.temp_new_owner = None;
        self.confirms.clear();
        self.increment += 1;
        Ok(new_owner)
    }

    // Views.

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn guardian_count(&self) -> usize {
        self.guardians.len()
    }

    pub fn max_guardians(&self) -> usize {
        MAX_GUARDIANS
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn delay(&self) -> u64 {
        self.delay
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    pub fn guardians(&self, index: usize) -> Option<Fr> {
        self.guardians.get(index).copied()
    }

    pub fn guardian_index(&self, commitment: &Fr) -> Option<usize> {
        self.guardian_index.get(commitment).copied()
    }

    pub fn confirms(&self, commitment: &Fr) -> bool {
        self.confirms.contains(commitment)
    }

    pub fn confirmed_count(&self) -> u64 {
        self.confirms.len() as u64
    }

    pub fn temp_new_owner(&self) -> Option<Address> {
        self.temp_new_owner
    }

    pub fn state(&self) -> RecoveryState {
        if self.temp_new_owner.is_some() {
            RecoveryState::PendingRecovery
        } else {
            RecoveryState::Idle
        }
    }

    pub(crate) fn ensure_owner(&self, caller: Address) -> Result<(), RegistryError> {
        if caller != self.owner {
            return Err(RegistryError::NotOwner);
        }
        Ok(())
    }
}

fn check_threshold(threshold: u64, guardian_count: u64) -> Result<(), RegistryError> {
    if threshold == 0 || threshold > guardian_count {
        return Err(RegistryError::ThresholdOutOfRange {
            threshold,
            guardian_count,
        });
    }
    Ok(())
}
