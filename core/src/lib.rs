// src/lib.rs

//! stagechain: a synchronous, continuation-passing stage pipeline.
//!
//! A [`Chain`] holds an ordered list of stages. Running it hands a mutable
//! plan to the first stage together with a [`Next`] continuation; every stage
//! decides for itself whether to call `next`, how often, and with which plan
//! and error. There is no driver loop:
//!  - not calling `next` ends the run after that stage,
//!  - calling it twice runs the rest of the chain twice,
//!  - the error handed to `next` is exactly what the following stage sees.
//!
//! ```
//! use stagechain::Chain;
//!
//! #[derive(Default)]
//! struct Plan {
//!   count: u32,
//! }
//!
//! let chain = Chain::<Plan>::new();
//! chain
//!   .add(|plan, err, next| {
//!     plan.count = 1;
//!     next.call(plan, err);
//!   })
//!   .add(|plan, err, next| {
//!     plan.count += 1;
//!     next.call(plan, err);
//!   })
//!   .add(|plan, _err, _next| plan.count += 1);
//!
//! let mut plan = Plan::default();
//! chain.process(&mut plan);
//! assert_eq!(plan.count, 3);
//! ```

pub mod chain;
pub mod core;
pub mod error;

// --- Re-exports for the Public API ---

pub use crate::chain::Chain;
pub use crate::core::control::ChainState;
pub use crate::core::next::Next;
pub use crate::core::step::Stage;
pub use crate::error::{ChainError, ChainResult};
