//! Guardian registry, quorum state machine, and timelocked administration.
//!
//! This crate models the on-chain half of the recovery protocol as owned
//! state behind explicit transition functions. Every operation validates all
//! of its preconditions before touching state, so a returned error always
//! leaves the registry exactly as it was, matching the single-transaction
//! atomicity the chain would otherwise provide.
//!
//! # Recovery state machine
//!
//! ```text
//! Idle --submit_new_owner--> PendingRecovery --change_owner--> Idle
//!                              |        ^
//!                              |        | confirm_change_owner (quorum builds)
//!                              +--------+
//! ```
//!
//! Completing a recovery clears the candidate and every confirmation and
//! advances the replay counter; a consumed proof can never confirm a future
//! attempt. Guardian-set administration (add/remove/threshold) never rides
//! the recovery path: it is owner-driven and gated by the timelock queue.

pub mod account;
pub mod registry;
pub mod signatures;
pub mod timelock;

pub use account::{AccountDirectory, AccountError, AccountOps};
pub use registry::{GuardianRegistry, RecoveryState, RegistryError, MAX_GUARDIANS};
pub use signatures::{check_signatures, recover_address, RecoverableSignature, SignatureError};
pub use timelock::{
    AdminAction, ExecutionState, TimelockError, TimelockQueue, TimelockTransaction,
    TransactionKind,
};
