// stagechain/src/error.rs
use std::time::Duration;
use thiserror::Error;

/// Failures of the chain itself.
///
/// Stage errors never show up here: they are opaque values threaded from one
/// stage to the next through `Next::call` and the chain does not look at them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
  /// A chain operation was attempted from inside one of the same chain's stages,
  /// on the thread that is currently running it.
  #[error("Chain '{chain}' re-entered from one of its own stages via `{operation}`")]
  Reentrant { chain: String, operation: &'static str },

  /// Another run currently holds the chain lock.
  #[error("Chain '{chain}' is busy with another run")]
  Busy { chain: String },

  #[error("Timed out after {timeout:?} waiting for chain '{chain}'")]
  LockTimeout { chain: String, timeout: Duration },
}

pub type ChainResult<T, E = ChainError> = std::result::Result<T, E>;
