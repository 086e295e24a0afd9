// zkgr/zkgr-circuit/src/gadgets/mod.rs

pub mod eddsa;
pub mod message;
pub mod poseidon;
pub mod recovery;
