// stagechain/src/core/control.rs

//! Structural state of a chain.

/// Whether a chain currently has any stages.
///
/// `add` moves a chain from `Empty` to `Populated`, `clear` moves it back.
/// Running a chain never changes its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
  /// No stages registered; `process` is a no-op.
  Empty,
  /// At least one stage registered.
  Populated,
}

impl ChainState {
  pub(crate) fn for_len(len: usize) -> Self {
    if len == 0 {
      ChainState::Empty
    } else {
      ChainState::Populated
    }
  }
}
