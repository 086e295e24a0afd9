// zkgr/zkgr-registry/src/timelock.rs
//
// Guardian administration never rides the ZK recovery path: the owner queues
// add/remove/threshold mutations here, and only the account's own dispatch
// may execute them once the delay has elapsed. Queued transactions stay
// cancellable until execution; Executed and Cancelled are terminal.

use ark_bn254::Fr;
use thiserror::Error;

use zkgr_common::Address;

use crate::registry::{GuardianRegistry, RegistryError};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TimelockError {
    #[error("eta is earlier than now + delay")]
    DelayTooShort,
    #[error("unknown transaction index {0}")]
    UnknownTransaction(usize),
    #[error("transaction is not queued")]
    NotQueued,
    #[error("transaction is not yet due")]
    NotYetDue,
    #[error("caller is not the registry owner")]
    NotOwner,
    #[error("caller is not the account")]
    NotAccount,
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A queued guardian-set mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminAction {
    AddGuardian(Fr),
    RemoveGuardian(Fr),
    SetThreshold(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    AddGuardian,
    RemoveGuardian,
    SetThreshold,
    /// Reserved for account-level calls outside guardian administration.
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionState {
    Queued,
    Executed,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelockTransaction {
    pub action: AdminAction,
    pub eta: u64,
    pub kind: TransactionKind,
    pub state: ExecutionState,
}

impl AdminAction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            AdminAction::AddGuardian(_) => TransactionKind::AddGuardian,
            AdminAction::RemoveGuardian(_) => TransactionKind::RemoveGuardian,
            AdminAction::SetThreshold(_) => TransactionKind::SetThreshold,
        }
    }
}

/// Index-keyed, insertion-ordered transaction store.
#[derive(Default)]
pub struct TimelockQueue {
    transactions: Vec<TimelockTransaction>,
}

impl TimelockQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a mutation for execution no earlier than `eta`. Owner-only;
    /// `eta` must be at least the registry's administration delay away.
    pub fn queue(
        &mut self,
        registry: &GuardianRegistry,
        caller: Address,
        action: AdminAction,
        eta: u64,
        now: u64,
    ) -> Result<usize, TimelockError> {
        if caller != registry.owner() {
            return Err(TimelockError::NotOwner);
        }
        if eta < now + registry.delay() {
            return Err(TimelockError::DelayTooShort);
        }
        let index = self.transactions.len();
        self.transactions.push(TimelockTransaction {
            action,
            eta,
            kind: action.kind(),
            state: ExecutionState::Queued,
        });
        Ok(index)
    }

    /// Apply a queued mutation to the registry. Account-only; requires
    /// `now >= eta` and a still-queued transaction. The transaction flips to
    /// `Executed` only if the mutation itself succeeded.
    pub fn execute(
        &mut self,
        registry: &mut GuardianRegistry,
        caller: Address,
        index: usize,
        now: u64,
    ) -> Result<(), TimelockError> {
        if caller != registry.account() {
            return Err(TimelockError::NotAccount);
        }
        let transaction = self
            .transactions
            .get(index)
            .ok_or(TimelockError::UnknownTransaction(index))?;
        if transaction.state != ExecutionState::Queued {
            return Err(TimelockError::NotQueued);
        }
        if now < transaction.eta {
            return Err(TimelockError::NotYetDue);
        }

        match transaction.action {
            AdminAction::AddGuardian(commitment) => registry.add_guardian(commitment)?,
            AdminAction::RemoveGuardian(commitment) => registry.remove_guardian(commitment)?,
            AdminAction::SetThreshold(threshold) => registry.set_threshold(threshold)?,
        }
        self.transactions[index].state = ExecutionState::Executed;
        Ok(())
    }

    /// Withdraw a queued transaction. Owner-only; terminal states stay put.
    pub fn cancel(
        &mut self,
        registry: &GuardianRegistry,
        caller: Address,
        index: usize,
    ) -> Result<(), TimelockError> {
        if caller != registry.owner() {
            return Err(TimelockError::NotOwner);
        }
        let transaction = self
            .transactions
            .get_mut(index)
            .ok_or(TimelockError::UnknownTransaction(index))?;
        if transaction.state != ExecutionState::Queued {
            return Err(TimelockError::NotQueued);
        }
        transaction.state = ExecutionState::Cancelled;
        Ok(())
    }

    pub fn transaction(&self, index: usize) -> Option<&TimelockTransaction> {
        self.transactions.get(index)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
