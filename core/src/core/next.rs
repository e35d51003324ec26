// stagechain/src/core/next.rs

//! The continuation handed to every stage.

use super::step::StageDef;
use tracing::{event, Level};

/// The rest of the chain, as seen from one stage.
///
/// A `Next` is a borrow of the running chain's stage list plus the position of
/// the stage it will invoke. It is `Copy`, so a stage can call it several
/// times (each call runs the whole remaining suffix synchronously) or drop it
/// to end the run. A `Next` past the last stage is valid and calling it does
/// nothing.
pub struct Next<'a, P: 'static, E: 'static> {
  stages: &'a [StageDef<P, E>],
  position: usize,
}

impl<'a, P: 'static, E: 'static> Next<'a, P, E> {
  pub(crate) fn new(stages: &'a [StageDef<P, E>], position: usize) -> Self {
    Self { stages, position }
  }

  /// Invokes the following stage with `plan` and `err`.
  ///
  /// Returns once that stage, and everything it chose to continue into, has
  /// returned. The plan and error need not be the ones this stage received.
  pub fn call(self, plan: &mut P, err: Option<E>) {
    match self.stages.get(self.position) {
      Some(stage_def) => stage_def.invoke(self.position, self.stages, plan, err),
      None => {
        event!(Level::TRACE, position = self.position, "Continuation past the last stage, end of chain.");
      }
    }
  }

  /// Index of the stage this continuation invokes.
  pub fn position(&self) -> usize {
    self.position
  }

  /// True when there is no stage left to invoke.
  pub fn is_end(&self) -> bool {
    self.position >= self.stages.len()
  }
}

impl<P: 'static, E: 'static> Clone for Next<'_, P, E> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<P: 'static, E: 'static> Copy for Next<'_, P, E> {}

impl<P: 'static, E: 'static> std::fmt::Debug for Next<'_, P, E> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Next")
      .field("position", &self.position)
      .field("stage", &self.stages.get(self.position).map(|s| s.name.as_str()))
      .finish()
  }
}
