// stagechain/src/chain/mod.rs

//! Defines the `Chain<P, E>` struct, its construction and its execution.

pub mod definition;
pub mod execution;
pub(crate) mod guard;

pub use definition::Chain;
